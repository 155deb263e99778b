// src/annotate.rs

//! Panel labels ("a", "b", ...) at standard positions on one or more axes.

use std::str::FromStr;

use crate::constants::{
    ANNOTATE_PAD_INSIDE, ANNOTATE_PAD_OUTSIDE_BOTTOM, ANNOTATE_PAD_OUTSIDE_LEFT,
    ANNOTATE_PAD_OUTSIDE_RIGHT, ANNOTATE_PAD_OUTSIDE_TOP, LABEL_SUBPLOT_EDGE_PAD,
};
use crate::error::{Error, Result};
use crate::figure::{Axes, Coords, HAlign, TextItem, VAlign};

/// One of nine standard anchor points on the frame of an axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::CenterLeft,
        Anchor::Center,
        Anchor::CenterRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    pub fn from_parts(v: VAlign, h: HAlign) -> Self {
        match (v, h) {
            (VAlign::Top, HAlign::Left) => Anchor::TopLeft,
            (VAlign::Top, HAlign::Center) => Anchor::TopCenter,
            (VAlign::Top, HAlign::Right) => Anchor::TopRight,
            (VAlign::Center, HAlign::Left) => Anchor::CenterLeft,
            (VAlign::Center, HAlign::Center) => Anchor::Center,
            (VAlign::Center, HAlign::Right) => Anchor::CenterRight,
            (VAlign::Bottom, HAlign::Left) => Anchor::BottomLeft,
            (VAlign::Bottom, HAlign::Center) => Anchor::BottomCenter,
            (VAlign::Bottom, HAlign::Right) => Anchor::BottomRight,
        }
    }

    pub fn horizontal(self) -> HAlign {
        match self {
            Anchor::TopLeft | Anchor::CenterLeft | Anchor::BottomLeft => HAlign::Left,
            Anchor::TopCenter | Anchor::Center | Anchor::BottomCenter => HAlign::Center,
            Anchor::TopRight | Anchor::CenterRight | Anchor::BottomRight => HAlign::Right,
        }
    }

    pub fn vertical(self) -> VAlign {
        match self {
            Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight => VAlign::Top,
            Anchor::CenterLeft | Anchor::Center | Anchor::CenterRight => VAlign::Center,
            Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight => VAlign::Bottom,
        }
    }

    /// Default (horizontal, vertical) offset from the frame, in axes fractions.
    pub fn default_pad(self, outside: bool) -> (f64, f64) {
        if !outside {
            return ANNOTATE_PAD_INSIDE;
        }
        let px = match self.horizontal() {
            HAlign::Left => ANNOTATE_PAD_OUTSIDE_LEFT,
            HAlign::Right => ANNOTATE_PAD_OUTSIDE_RIGHT,
            HAlign::Center => 0.0,
        };
        let py = match self.vertical() {
            VAlign::Top => ANNOTATE_PAD_OUTSIDE_TOP,
            VAlign::Bottom => ANNOTATE_PAD_OUTSIDE_BOTTOM,
            VAlign::Center => 0.0,
        };
        (px, py)
    }

    /// Anchor point in axes fractions.
    pub fn point(self, outside: bool, pad: (f64, f64)) -> (f64, f64) {
        let (px, py) = pad;
        let x = match (self.horizontal(), outside) {
            (HAlign::Left, false) => px,
            (HAlign::Left, true) => -px,
            (HAlign::Right, false) => 1.0 - px,
            (HAlign::Right, true) => 1.0 + px,
            (HAlign::Center, _) => 0.5,
        };
        let y = match (self.vertical(), outside) {
            (VAlign::Top, false) => 1.0 - py,
            (VAlign::Top, true) => 1.0 + py,
            (VAlign::Bottom, false) => py,
            (VAlign::Bottom, true) => -py,
            (VAlign::Center, _) => 0.5,
        };
        (x, y)
    }

    /// Text alignment relative to the anchor point. Outside the frame the
    /// alignment is mirrored so the text grows away from the axes.
    pub fn alignment(self, outside: bool) -> (HAlign, VAlign) {
        let (h, v) = (self.horizontal(), self.vertical());
        if !outside {
            return (h, v);
        }
        let h = match h {
            HAlign::Left => HAlign::Right,
            HAlign::Right => HAlign::Left,
            HAlign::Center => HAlign::Center,
        };
        let v = match v {
            VAlign::Top => VAlign::Bottom,
            VAlign::Bottom => VAlign::Top,
            VAlign::Center => VAlign::Center,
        };
        (h, v)
    }
}

/// Text for each annotated area.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Labels {
    /// 'a', 'b', 'c', ... in area order.
    #[default]
    Auto,
    /// One label per area, in area order.
    Text(Vec<String>),
}

impl Labels {
    pub fn one(text: impl Into<String>) -> Self {
        Labels::Text(vec![text.into()])
    }
}

impl<S: Into<String>> FromIterator<S> for Labels {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Labels::Text(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub anchor: Anchor,
    pub outside: bool,
    /// Overrides [`Anchor::default_pad`].
    pub pad: Option<(f64, f64)>,
    /// Every `{}` is replaced by the label.
    pub template: String,
    pub coords: Coords,
    pub font_size: Option<f64>,
    pub bold: bool,
}

impl Default for Annotation {
    fn default() -> Self {
        Self {
            anchor: Anchor::TopLeft,
            outside: false,
            pad: None,
            template: "{}".to_string(),
            coords: Coords::Axes,
            font_size: None,
            bold: true,
        }
    }
}

impl Annotation {
    pub fn at(anchor: Anchor) -> Self {
        Self {
            anchor,
            ..Self::default()
        }
    }

    pub fn outside(mut self, outside: bool) -> Self {
        self.outside = outside;
        self
    }

    pub fn pad(mut self, pad: (f64, f64)) -> Self {
        self.pad = Some(pad);
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn coords(mut self, coords: Coords) -> Self {
        self.coords = coords;
        self
    }

    pub fn font_size(mut self, points: f64) -> Self {
        self.font_size = Some(points);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    fn text_item(&self, label: &str) -> TextItem {
        let pad = self.pad.unwrap_or_else(|| self.anchor.default_pad(self.outside));
        let (x, y) = self.anchor.point(self.outside, pad);
        let (h_align, v_align) = self.anchor.alignment(self.outside);
        TextItem {
            text: self.template.replace("{}", label),
            x,
            y,
            coords: self.coords,
            h_align,
            v_align,
            font_size: self.font_size,
            bold: self.bold,
        }
    }
}

/// Letter label for the `index`th panel: a..z, then aa, ab, ...
pub fn auto_label(index: usize) -> String {
    let mut n = index;
    let mut out = Vec::new();
    loop {
        out.push((b'a' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    out.iter().rev().collect()
}

/// Labels every area in `areas`. Pass a single area as a one-element
/// iterator, e.g. `Some(&mut ax)` or `fig.axes_mut().first_mut()`.
pub fn annotate<'a, I>(areas: I, labels: Labels, opts: &Annotation) -> Result<()>
where
    I: IntoIterator<Item = &'a mut Axes>,
{
    let mut areas: Vec<&mut Axes> = areas.into_iter().collect();
    let texts: Vec<String> = match labels {
        Labels::Auto => (0..areas.len()).map(auto_label).collect(),
        Labels::Text(texts) => {
            if texts.len() != areas.len() {
                return Err(Error::LabelCount {
                    labels: texts.len(),
                    areas: areas.len(),
                });
            }
            texts
        }
    };
    for (ax, label) in areas.iter_mut().zip(texts.iter()) {
        ax.texts.push(opts.text_item(label));
    }
    Ok(())
}

/// Legend-style location of a subplot label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Loc {
    Anchor(Anchor),
    /// Center of the text at these axes coordinates.
    At(f64, f64),
}

impl Default for Loc {
    fn default() -> Self {
        Loc::Anchor(Anchor::TopLeft)
    }
}

impl FromStr for Loc {
    type Err = String;

    /// Accepts `"upper left"`, `"lower center"`, `"right"`, `"center"`, ...
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let (v_word, h_word) = match words.as_slice() {
            [h] => ("", *h),
            [v, h] => (*v, *h),
            _ => return Err(format!("invalid location {s:?}")),
        };
        let v = match v_word {
            "upper" => VAlign::Top,
            "" | "center" => VAlign::Center,
            "lower" => VAlign::Bottom,
            other => return Err(format!("invalid vertical location {other:?}")),
        };
        let h = match h_word {
            "left" => HAlign::Left,
            "center" => HAlign::Center,
            "right" => HAlign::Right,
            other => return Err(format!("invalid horizontal location {other:?}")),
        };
        Ok(Loc::Anchor(Anchor::from_parts(v, h)))
    }
}

/// Puts `label` inside `ax` at `loc`, `edge_pad` away from the frame.
pub fn label_subplot(ax: &mut Axes, label: &str, loc: Loc, bold: bool, edge_pad: Option<f64>) {
    let pad = edge_pad.unwrap_or(LABEL_SUBPLOT_EDGE_PAD);
    let item = match loc {
        Loc::Anchor(anchor) => {
            let (x, y) = anchor.point(false, (pad, pad));
            TextItem {
                h_align: anchor.horizontal(),
                v_align: anchor.vertical(),
                bold,
                ..TextItem::new(label, x, y)
            }
        }
        Loc::At(x, y) => TextItem {
            h_align: HAlign::Center,
            v_align: VAlign::Center,
            bold,
            ..TextItem::new(label, x, y)
        },
    };
    ax.texts.push(item);
}
