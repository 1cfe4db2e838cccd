//! Bootstrap-style alert banners in the page container

use soundstudio_common::config::NotificationConfig;
use soundstudio_common::{Banner, BannerHost, NotifyError};
use wasm_bindgen_x::JsValue;

use crate::wasm_utils::describe_js_error;

/// Inserts banners into the element matching `container_selector`, ahead of
/// its `anchor_selector` child (or as first child when there is none).
pub struct DomBannerHost {
    document: web_sys_x::Document,
    container_selector: String,
    anchor_selector: String,
}

fn dom_error(e: JsValue) -> NotifyError {
    NotifyError::Dom(describe_js_error(&e))
}

impl DomBannerHost {
    pub fn new(document: web_sys_x::Document, config: &NotificationConfig) -> Self {
        Self {
            document,
            container_selector: config.container_selector.clone(),
            anchor_selector: config.anchor_selector.clone(),
        }
    }

    fn build(&self, banner: &Banner) -> Result<web_sys_x::Element, JsValue> {
        let element = self.document.create_element("div")?;
        element.set_class_name(&banner.class);
        element.set_attribute("role", "alert")?;

        // Text node, so page-supplied messages are never parsed as markup.
        let text = self.document.create_text_node(&banner.message);
        element.append_child(&text)?;

        let close = self.document.create_element("button")?;
        close.set_attribute("type", "button")?;
        close.set_class_name("btn-close");
        close.set_attribute("data-bs-dismiss", "alert")?;
        close.set_attribute("aria-label", "Close")?;
        element.append_child(&close)?;

        Ok(element)
    }
}

impl BannerHost for DomBannerHost {
    type Element = web_sys_x::Element;

    fn insert(&self, banner: &Banner) -> Result<web_sys_x::Element, NotifyError> {
        let container = self
            .document
            .query_selector(&self.container_selector)
            .map_err(dom_error)?
            .ok_or_else(|| NotifyError::ContainerMissing {
                selector: self.container_selector.clone(),
            })?;

        let element = self.build(banner).map_err(dom_error)?;

        let container_node: &web_sys_x::Node = container.as_ref();
        let anchor: Option<web_sys_x::Node> = container
            .query_selector(&self.anchor_selector)
            .ok()
            .flatten()
            .map(web_sys_x::Node::from)
            .filter(|anchor| {
                anchor
                    .parent_node()
                    .is_some_and(|parent| parent.is_same_node(Some(container_node)))
            })
            .or_else(|| container.first_child());

        container
            .insert_before(&element, anchor.as_ref())
            .map_err(dom_error)?;
        Ok(element)
    }

    fn remove(&self, element: &web_sys_x::Element) {
        // No-op if the user already closed it.
        element.remove();
    }
}
