//! What a DOM renderer writes for one frame.
//!
//! Every keyed node maps to the element carrying `data-reveal="<key>"`. Its
//! pose becomes `opacity` and `transform`. Bars also get a `width`, and
//! count-up output replaces the element's text.

use amalgated_core::Pose;
use amalgated_site::{TextStyle, View, ViewKind};

#[derive(Clone, Debug, PartialEq)]
pub struct Patch<'a> {
    pub key: &'a str,
    pub styles: Vec<(&'static str, String)>,
    pub text: Option<&'a str>,
}

impl Patch<'_> {
    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

pub fn transform(pose: &Pose) -> String {
    format!(
        "translate({}px, {}px) scale({}) scaleX({}) scaleY({})",
        pose.x, pose.y, pose.scale, pose.scale_x, pose.scale_y
    )
}

/// One patch per keyed node, depth first.
pub fn patches(view: &View) -> Vec<Patch<'_>> {
    let mut out = Vec::new();
    view.walk(&mut |v| {
        let Some(key) = v.key.as_deref() else {
            return;
        };
        let mut styles = vec![
            ("opacity", v.pose.opacity.to_string()),
            ("transform", transform(&v.pose)),
        ];
        let mut text = None;
        match &v.kind {
            ViewKind::Bar { fraction } => {
                styles.push(("width", format!("{:.1}%", fraction * 100.0)));
            }
            ViewKind::Text {
                text: t,
                style: TextStyle::Counter,
            } => text = Some(t.as_str()),
            _ => {}
        }
        out.push(Patch { key, styles, text });
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use amalgated_site::view::{Bar, Body, Counter, Row};

    #[test]
    fn only_keyed_nodes_are_patched() {
        let view = Row().key("row").child((
            Counter("42%").key("count"),
            Body("unkeyed"),
            Body("static").key("body"),
            Bar(0.25).key("bar"),
        ));
        let patches = patches(&view);
        let keys: Vec<&str> = patches.iter().map(|p| p.key).collect();
        assert_eq!(keys, ["row", "count", "body", "bar"]);

        assert_eq!(patches[1].text, Some("42%"));
        assert_eq!(patches[2].text, None);
        assert_eq!(patches[3].style("width"), Some("25.0%"));
        assert_eq!(patches[0].style("width"), None);
        assert_eq!(patches[0].style("opacity"), Some("1"));
        assert_eq!(
            patches[0].style("transform"),
            Some("translate(0px, 0px) scale(1) scaleX(1) scaleY(1)")
        );
    }
}
