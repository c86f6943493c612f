use std::collections::BTreeMap;

use serde::Serialize;

use super::validate::{self, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Contact,
    Inquiry,
    Newsletter,
}

/// One input a form reads on submit.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    pub selector: &'static str,
    /// Name in the submitted payload.
    pub key: &'static str,
    /// `None` fields are carried but never checked.
    pub validate: Option<Validator>,
    /// Blank values are neither checked nor marked.
    pub optional: bool,
}

const fn checked(selector: &'static str, key: &'static str, validate: Validator) -> FieldSpec {
    FieldSpec {
        selector,
        key,
        validate: Some(validate),
        optional: false,
    }
}

const CONTACT_FIELDS: [FieldSpec; 5] = [
    checked("#name", "name", validate::contact_name),
    checked("#email", "email", validate::contact_email),
    FieldSpec {
        selector: "#phone",
        key: "phone",
        validate: Some(validate::contact_phone),
        optional: true,
    },
    checked("#subject", "subject", validate::contact_subject),
    checked("#message", "message", validate::contact_message),
];

const INQUIRY_FIELDS: [FieldSpec; 4] = [
    checked("[name=\"name\"]", "name", validate::inquiry_name),
    checked("[name=\"email\"]", "email", validate::inquiry_email),
    checked("[name=\"phone\"]", "phone", validate::inquiry_phone),
    FieldSpec {
        selector: "[name=\"property_id\"]",
        key: "property_id",
        validate: None,
        optional: true,
    },
];

const NEWSLETTER_FIELDS: [FieldSpec; 1] =
    [checked("[type=\"email\"]", "email", validate::newsletter_email)];

const SPINNER: &str = "<span class=\"spinner-border spinner-border-sm me-2\"></span>Sending...";

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Contact, FormKind::Inquiry, FormKind::Newsletter];

    /// Which forms on the page are of this kind.
    pub fn selector(self) -> &'static str {
        match self {
            FormKind::Contact => "#contactForm",
            FormKind::Inquiry => ".property-inquiry-form",
            FormKind::Newsletter => ".newsletter-form",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            FormKind::Contact => &CONTACT_FIELDS,
            FormKind::Inquiry => &INQUIRY_FIELDS,
            FormKind::Newsletter => &NEWSLETTER_FIELDS,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Inquiry => "inquiry",
            FormKind::Newsletter => "newsletter",
        }
    }

    /// Submit button contents while the request is in flight.
    pub fn busy_label(self) -> &'static str {
        match self {
            FormKind::Newsletter => "<span class=\"spinner-border spinner-border-sm\"></span>",
            _ => SPINNER,
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            FormKind::Contact => {
                "Thank you! Your message has been sent successfully. We will get back to you soon."
            }
            FormKind::Inquiry => "Your inquiry has been sent! Our team will contact you soon.",
            FormKind::Newsletter => "Thank you for subscribing to our newsletter!",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            FormKind::Contact => "Oops! Something went wrong. Please try again later.",
            FormKind::Inquiry => "Failed to send inquiry. Please try again.",
            FormKind::Newsletter => "Subscription failed. Please try again.",
        }
    }

    /// Stand-in latency of the simulated transport.
    pub fn simulated_delay_ms(self) -> u32 {
        match self {
            FormKind::Contact => 2000,
            FormKind::Inquiry | FormKind::Newsletter => 1500,
        }
    }

    /// Contact fields re-validate on blur; the other forms only on submit.
    pub fn validates_on_blur(self) -> bool {
        self == FormKind::Contact
    }
}

/// What gets sent once every check passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub form: FormKind,
    pub fields: BTreeMap<String, String>,
}

/// Result of checking every field of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// Per checked field: its selector and outcome. Blank optional fields
    /// and unchecked fields are absent.
    pub verdicts: Vec<(&'static str, Result<(), &'static str>)>,
    pub submission: Submission,
}

impl Review {
    pub fn is_valid(&self) -> bool {
        self.verdicts.iter().all(|(_, verdict)| verdict.is_ok())
    }

    pub fn into_submission(self) -> Option<Submission> {
        self.is_valid().then_some(self.submission)
    }
}

/// Checks every field of `kind`. `value_of` returns `None` for inputs the
/// form does not contain; those are skipped.
pub fn review(kind: FormKind, mut value_of: impl FnMut(&FieldSpec) -> Option<String>) -> Review {
    let mut verdicts = Vec::new();
    let mut fields = BTreeMap::new();
    for spec in kind.fields() {
        let Some(value) = value_of(spec) else {
            continue;
        };
        if let Some(check) = spec.validate {
            if !(spec.optional && value.trim().is_empty()) {
                verdicts.push((spec.selector, check(&value)));
            }
        }
        fields.insert(spec.key.to_string(), value);
    }
    Review {
        verdicts,
        submission: Submission { form: kind, fields },
    }
}
