use dioxus::prelude::*;

/// Build, rebuild and serialize a root component as a full HTML document.
pub fn render_document<P, M>(root: impl ComponentFunction<P, M>, props: P) -> String
where
    P: Clone + 'static,
    M: 'static,
{
    let mut dom = VirtualDom::new_with_props(root, props);
    dom.rebuild_in_place();
    format!("<!DOCTYPE html><html lang=\"en\">{}</html>", dioxus::ssr::render(&dom))
}
