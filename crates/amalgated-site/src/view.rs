//! Display tree produced by [`Page::frame`](crate::page::Page::frame).
//!
//! A `View` is a plain value: what to show and the pose each animated node is
//! in at the sampled instant. Renderers (a DOM patcher, a terminal dump, a
//! snapshot test) walk it; nothing in here reacts to input.

use std::fmt;

use amalgated_core::{Pose, RevealChoreographer};
use web_time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyle {
    /// Small uppercase eyebrow above a heading.
    Label,
    Heading,
    Title,
    Body,
    /// Output of a count-up.
    Counter,
}

impl TextStyle {
    fn tag(self) -> &'static str {
        match self {
            TextStyle::Label => "label",
            TextStyle::Heading => "heading",
            TextStyle::Title => "title",
            TextStyle::Body => "body",
            TextStyle::Counter => "counter",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewKind {
    Section { anchor: String },
    Column,
    Row,
    Grid { columns: usize },
    Text { text: String, style: TextStyle },
    Image { src: String, alt: String },
    Video { src: String },
    Link { label: String, href: String },
    /// Horizontal fill, `fraction` in `0..=1`.
    Bar { fraction: f32 },
    /// Decorative shape (timeline dots, accent rules).
    Marker,
}

#[derive(Clone, Debug, PartialEq)]
pub struct View {
    pub key: Option<String>,
    pub kind: ViewKind,
    pub pose: Pose,
    pub children: Vec<View>,
}

impl View {
    pub fn new(kind: ViewKind) -> Self {
        View {
            key: None,
            kind,
            pose: Pose::REST,
            children: vec![],
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    /// Keys the view and applies the choreographer's pose for that key.
    pub fn reveal(self, choreo: &RevealChoreographer, key: &str, now: Instant) -> Self {
        let pose = choreo.pose(key, now);
        self.key(key).pose(pose)
    }

    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }

    /// Appends children.
    pub fn child(mut self, children: impl IntoChildren) -> Self {
        self.children.extend(children.into_children());
        self
    }

    pub fn find(&self, key: &str) -> Option<&View> {
        if self.key.as_deref() == Some(key) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(key))
    }

    pub fn find_section(&self, anchor: &str) -> Option<&View> {
        if matches!(&self.kind, ViewKind::Section { anchor: a } if a == anchor) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_section(anchor))
    }

    /// Text of every text node, depth first.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |v| {
            if let ViewKind::Text { text, .. } = &v.kind {
                out.push(text.as_str());
            }
        });
        out
    }

    pub fn node_count(&self) -> usize {
        let mut n = 0;
        self.walk(&mut |_| n += 1);
        n
    }

    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a View)) {
        f(self);
        for c in &self.children {
            c.walk(f);
        }
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}", "", indent = depth * 2)?;
        match &self.kind {
            ViewKind::Section { anchor } => write!(f, "section #{anchor}")?,
            ViewKind::Column => write!(f, "column")?,
            ViewKind::Row => write!(f, "row")?,
            ViewKind::Grid { columns } => write!(f, "grid({columns})")?,
            ViewKind::Text { text, style } => write!(f, "{} {text:?}", style.tag())?,
            ViewKind::Image { src, alt } => write!(f, "image {alt:?} <{src}>")?,
            ViewKind::Video { src } => write!(f, "video <{src}>")?,
            ViewKind::Link { label, href } => write!(f, "link {label:?} -> {href}")?,
            ViewKind::Bar { fraction } => write!(f, "bar {:.0}%", fraction * 100.0)?,
            ViewKind::Marker => write!(f, "marker")?,
        }
        if let Some(key) = &self.key {
            write!(f, " [{key}]")?;
        }
        if !self.pose.is_rest() {
            write!(f, " {{")?;
            write_pose(f, &self.pose)?;
            write!(f, "}}")?;
        }
        writeln!(f)?;
        for c in &self.children {
            c.write_outline(f, depth + 1)?;
        }
        Ok(())
    }
}

fn write_pose(f: &mut fmt::Formatter<'_>, pose: &Pose) -> fmt::Result {
    let rest = Pose::REST;
    let mut sep = "";
    let mut field = |f: &mut fmt::Formatter<'_>, name: &str, v: f32, digits: usize| {
        let r = write!(f, "{sep}{name}={v:.digits$}");
        sep = " ";
        r
    };
    if pose.opacity != rest.opacity {
        field(f, "opacity", pose.opacity, 2)?;
    }
    if pose.x != rest.x {
        field(f, "x", pose.x, 1)?;
    }
    if pose.y != rest.y {
        field(f, "y", pose.y, 1)?;
    }
    if pose.scale != rest.scale {
        field(f, "scale", pose.scale, 2)?;
    }
    if pose.scale_x != rest.scale_x {
        field(f, "scale_x", pose.scale_x, 2)?;
    }
    if pose.scale_y != rest.scale_y {
        field(f, "scale_y", pose.scale_y, 2)?;
    }
    Ok(())
}

/// Indented outline, one node per line.
impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

pub fn Section(anchor: impl Into<String>) -> View {
    View::new(ViewKind::Section {
        anchor: anchor.into(),
    })
}

pub fn Column() -> View {
    View::new(ViewKind::Column)
}

pub fn Row() -> View {
    View::new(ViewKind::Row)
}

pub fn Grid(columns: usize) -> View {
    View::new(ViewKind::Grid { columns })
}

fn text(text: impl Into<String>, style: TextStyle) -> View {
    View::new(ViewKind::Text {
        text: text.into(),
        style,
    })
}

pub fn Label(t: impl Into<String>) -> View {
    text(t, TextStyle::Label)
}

pub fn Heading(t: impl Into<String>) -> View {
    text(t, TextStyle::Heading)
}

pub fn Title(t: impl Into<String>) -> View {
    text(t, TextStyle::Title)
}

pub fn Body(t: impl Into<String>) -> View {
    text(t, TextStyle::Body)
}

pub fn Counter(t: impl Into<String>) -> View {
    text(t, TextStyle::Counter)
}

pub fn Image(src: impl Into<String>, alt: impl Into<String>) -> View {
    View::new(ViewKind::Image {
        src: src.into(),
        alt: alt.into(),
    })
}

pub fn Video(src: impl Into<String>) -> View {
    View::new(ViewKind::Video { src: src.into() })
}

pub fn Link(label: impl Into<String>, href: impl Into<String>) -> View {
    View::new(ViewKind::Link {
        label: label.into(),
        href: href.into(),
    })
}

pub fn Bar(fraction: f32) -> View {
    View::new(ViewKind::Bar {
        fraction: fraction.clamp(0.0, 1.0),
    })
}

pub fn Marker() -> View {
    View::new(ViewKind::Marker)
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

/// `None` adds nothing; used for items whose asset did not resolve.
impl IntoChildren for Option<View> {
    fn into_children(self) -> Vec<View> {
        self.into_iter().collect()
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

impl<const N: usize> IntoChildren for [View; N] {
    fn into_children(self) -> Vec<View> {
        self.into()
    }
}

macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 A, 1 B);
impl_into_children_tuple!(0 A, 1 B, 2 C);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H);
