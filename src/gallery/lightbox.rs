//! Full-screen viewer over the gallery images.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlImageElement, KeyboardEvent};

use crate::dom;

/// One gallery tile as the lightbox shows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryImage {
    pub src: String,
    pub title: String,
    pub category: String,
}

impl GalleryImage {
    pub fn from_item(item: &Element) -> Self {
        let text = |selector: &str| {
            dom::select_in(item, selector)
                .and_then(|e| e.text_content())
                .unwrap_or_default()
        };
        let src = dom::select_in(item, "img")
            .and_then(|img| img.dyn_into::<HtmlImageElement>().ok())
            .map(|img| img.src())
            .unwrap_or_default();
        Self {
            src,
            title: text(".gallery-title"),
            category: text(".gallery-category"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Close,
    Previous,
    Next,
}

impl LightboxKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(LightboxKey::Close),
            "ArrowLeft" => Some(LightboxKey::Previous),
            "ArrowRight" => Some(LightboxKey::Next),
            _ => None,
        }
    }
}

pub trait LightboxView {
    fn render(&self, image: &GalleryImage);
    fn set_open(&self, open: bool);
}

pub struct Lightbox<V> {
    view: V,
    images: Vec<GalleryImage>,
    index: Cell<usize>,
    open: Cell<bool>,
}

impl<V: LightboxView> Lightbox<V> {
    /// `None` without images.
    pub fn new(view: V, images: Vec<GalleryImage>) -> Option<Self> {
        if images.is_empty() {
            return None;
        }
        Some(Self {
            view,
            images,
            index: Cell::new(0),
            open: Cell::new(false),
        })
    }

    pub fn index(&self) -> usize {
        self.index.get()
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    fn show(&self, index: usize) {
        self.index.set(index);
        self.view.render(&self.images[index]);
    }

    pub fn open(&self, index: usize) {
        if index >= self.images.len() {
            return;
        }
        self.show(index);
        self.open.set(true);
        self.view.set_open(true);
    }

    pub fn close(&self) {
        self.open.set(false);
        self.view.set_open(false);
    }

    pub fn show_next(&self) {
        self.show((self.index() + 1) % self.images.len());
    }

    pub fn show_prev(&self) {
        let len = self.images.len();
        self.show((self.index() + len - 1) % len);
    }

    /// Keys are ignored while closed. Returns whether the key was handled.
    pub fn handle_key(&self, key: LightboxKey) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            LightboxKey::Close => self.close(),
            LightboxKey::Previous => self.show_prev(),
            LightboxKey::Next => self.show_next(),
        }
        true
    }
}

pub struct DomLightbox {
    document: Document,
    root: Element,
    image: Option<HtmlImageElement>,
    title: Option<Element>,
    category: Option<Element>,
}

impl DomLightbox {
    pub fn new(document: Document, root: Element) -> Self {
        let image = dom::select_in(&root, ".lightbox-content img")
            .and_then(|img| img.dyn_into::<HtmlImageElement>().ok());
        let caption = dom::select_in(&root, ".lightbox-caption");
        let title = caption.as_ref().and_then(|c| dom::select_in(c, "h4"));
        let category = caption.as_ref().and_then(|c| dom::select_in(c, "p"));
        Self {
            document,
            root,
            image,
            title,
            category,
        }
    }
}

impl LightboxView for DomLightbox {
    fn render(&self, image: &GalleryImage) {
        if let Some(img) = &self.image {
            img.set_src(&image.src);
        }
        if let Some(title) = &self.title {
            dom::set_text(title, &image.title);
        }
        if let Some(category) = &self.category {
            dom::set_text(category, &image.category);
        }
    }

    fn set_open(&self, open: bool) {
        dom::toggle_class(&self.root, "active", open);
        if let Some(body) = self.document.body() {
            dom::set_style(&body, "overflow", if open { "hidden" } else { "" });
        }
    }
}

pub fn mount(document: &Document) -> Option<Rc<Lightbox<DomLightbox>>> {
    let root = dom::select(document, ".lightbox")?;
    let items = dom::select_all(document, ".gallery-item");
    let images = items.iter().map(GalleryImage::from_item).collect();
    let view = DomLightbox::new(document.clone(), root.clone());
    let Some(lightbox) = Lightbox::new(view, images) else {
        debug!("lightbox: no gallery items, staying inert");
        return None;
    };
    let lightbox = Rc::new(lightbox);

    for (index, item) in items.iter().enumerate() {
        let lightbox = Rc::clone(&lightbox);
        dom::listen(item, "click", move |_: Event| lightbox.open(index));
    }

    if let Some(close) = dom::select_in(&root, ".lightbox-close") {
        let lightbox = Rc::clone(&lightbox);
        dom::listen(&close, "click", move |_: Event| lightbox.close());
    }
    {
        let lightbox = Rc::clone(&lightbox);
        let backdrop = root.clone();
        dom::listen(&root, "click", move |event: Event| {
            let on_backdrop = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|t| t == backdrop);
            if on_backdrop {
                lightbox.close();
            }
        });
    }
    if let Some(prev) = dom::select_in(&root, ".lightbox-prev") {
        let lightbox = Rc::clone(&lightbox);
        dom::listen(&prev, "click", move |event: Event| {
            event.stop_propagation();
            lightbox.show_prev();
        });
    }
    if let Some(next) = dom::select_in(&root, ".lightbox-next") {
        let lightbox = Rc::clone(&lightbox);
        dom::listen(&next, "click", move |event: Event| {
            event.stop_propagation();
            lightbox.show_next();
        });
    }
    {
        let lightbox = Rc::clone(&lightbox);
        dom::listen(document, "keydown", move |event: KeyboardEvent| {
            if let Some(key) = LightboxKey::from_key(&event.key()) {
                lightbox.handle_key(key);
            }
        });
    }

    info!("lightbox: mounted over {} images", lightbox.len());
    Some(lightbox)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct FakeView {
        shown: RefCell<Vec<String>>,
        open: Cell<bool>,
    }

    impl LightboxView for &FakeView {
        fn render(&self, image: &GalleryImage) {
            self.shown.borrow_mut().push(image.title.clone());
        }

        fn set_open(&self, open: bool) {
            self.open.set(open);
        }
    }

    fn images(n: usize) -> Vec<GalleryImage> {
        (0..n)
            .map(|i| GalleryImage {
                src: format!("/img/{}.jpg", i),
                title: format!("Image {}", i),
                category: "villa".to_string(),
            })
            .collect()
    }

    #[test]
    fn empty_gallery_has_no_lightbox() {
        let view = FakeView::default();
        assert!(Lightbox::new(&view, Vec::new()).is_none());
    }

    #[test]
    fn next_from_last_wraps_to_first() {
        let view = FakeView::default();
        let lightbox = Lightbox::new(&view, images(3)).unwrap();
        lightbox.open(2);
        lightbox.show_next();
        assert_eq!(lightbox.index(), 0);
        assert_eq!(*view.shown.borrow(), vec!["Image 2", "Image 0"]);
    }

    #[test]
    fn prev_from_first_wraps_to_last() {
        let view = FakeView::default();
        let lightbox = Lightbox::new(&view, images(4)).unwrap();
        lightbox.open(0);
        lightbox.show_prev();
        assert_eq!(lightbox.index(), 3);
    }

    #[test]
    fn keys_only_act_while_open() {
        let view = FakeView::default();
        let lightbox = Lightbox::new(&view, images(3)).unwrap();
        assert!(!lightbox.handle_key(LightboxKey::Next));
        assert_eq!(lightbox.index(), 0);
        assert!(view.shown.borrow().is_empty());

        lightbox.open(1);
        assert!(view.open.get());
        assert!(lightbox.handle_key(LightboxKey::Next));
        assert!(lightbox.handle_key(LightboxKey::Previous));
        assert!(lightbox.handle_key(LightboxKey::Previous));
        assert_eq!(lightbox.index(), 0);
        assert!(lightbox.handle_key(LightboxKey::Close));
        assert!(!lightbox.is_open());
        assert!(!view.open.get());
        assert!(!lightbox.handle_key(LightboxKey::Close));
    }

    #[test]
    fn key_names() {
        assert_eq!(LightboxKey::from_key("Escape"), Some(LightboxKey::Close));
        assert_eq!(LightboxKey::from_key("ArrowLeft"), Some(LightboxKey::Previous));
        assert_eq!(LightboxKey::from_key("ArrowRight"), Some(LightboxKey::Next));
        assert_eq!(LightboxKey::from_key("Enter"), None);
    }

    #[test]
    fn out_of_range_open_is_ignored() {
        let view = FakeView::default();
        let lightbox = Lightbox::new(&view, images(2)).unwrap();
        lightbox.open(5);
        assert!(!lightbox.is_open());
    }
}
