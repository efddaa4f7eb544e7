use anyhow::Result;
use scribe_ui::{ScribeConfig, VElement, VNode, element};

use crate::render::render_tree;

/// Paragraph carrying a class and a single line of text.
pub fn text_component(class_name: &str, content: &str) -> VElement {
    element("p").prop("className", class_name).child(content)
}

pub fn hello_world() -> VNode {
    let style: scribe_ui::PropValue = [("color", "blue")].into_iter().collect();
    element("div")
        .child(text_component("hello-class", "Hello"))
        .child(element("span").prop("style", style).child("World"))
        .into()
}

pub fn run_demo(config: &ScribeConfig) -> Result<()> {
    let out = render_tree(&hello_world(), config)?;
    println!("{}", out);
    Ok(())
}
