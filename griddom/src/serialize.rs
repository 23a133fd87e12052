//! HTML serialization of [`Element`] trees.

use v_htmlescape::escape;

use crate::element::{Content, Element, VOID_TAGS};

/// Serialize an element and its subtree.
pub fn outer_html(element: &Element) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

/// Serialize only the content of an element.
pub fn inner_html(element: &Element) -> String {
    let mut out = String::new();
    write_content(&element.content, &mut out);
    out
}

fn write_element(element: &Element, out: &mut String) {
    if element.is_text_node() {
        write_content(&element.content, out);
        return;
    }

    out.push('<');
    out.push_str(&element.tag);
    if let Some(id) = &element.id {
        write_attr(out, "id", id);
    }
    if !element.classes.is_empty() {
        write_attr(out, "class", &element.classes.join(" "));
    }
    if !element.style.is_empty() {
        write_attr(out, "style", &element.style_text());
    }
    for (name, value) in &element.attrs {
        write_attr(out, name, value);
    }
    out.push('>');

    if VOID_TAGS.contains(&element.tag.as_str()) {
        return;
    }

    write_content(&element.content, out);
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn write_content(content: &Content, out: &mut String) {
    match content {
        Content::None => {}
        Content::Text(text) => out.push_str(&escape(text).to_string()),
        Content::Children(children) => {
            for child in children {
                write_element(child, out);
            }
        }
    }
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value).to_string());
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outer_html_orders_identity_first() {
        let el = Element::new("div")
            .attr("tabindex", "0")
            .style_decl("width", "10px")
            .class("a b")
            .id("root")
            .text("x < y");
        assert_eq!(
            outer_html(&el),
            "<div id=\"root\" class=\"a b\" style=\"width: 10px\" tabindex=\"0\">x &lt; y</div>"
        );
    }

    #[test]
    fn test_void_tags_have_no_closing_tag() {
        let el = Element::new("td").child(Element::new("img").attr("alt", ""));
        assert_eq!(outer_html(&el), "<td><img alt=\"\"></td>");
    }
}
