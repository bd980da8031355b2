/// Where a brand image lands on the page, in PDF points from the bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub logo: Placement,
    pub footer: Placement,
}

impl PageGeometry {
    pub const A4_WIDTH: f32 = 595.28;
    pub const A4_HEIGHT: f32 = 841.89;

    pub fn frame_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    pub fn frame_height(&self) -> f32 {
        self.page_height - self.margin_top - self.margin_bottom
    }

    /// Top edge of the printable frame.
    pub fn frame_top(&self) -> f32 {
        self.page_height - self.margin_top
    }
}

impl Default for PageGeometry {
    /// A4 with a 500pt wide frame; the footer banner lives in the bottom margin.
    fn default() -> Self {
        let page_width = Self::A4_WIDTH;
        let page_height = Self::A4_HEIGHT;
        let side = (page_width - 500.0) / 2.0;
        Self {
            page_width,
            page_height,
            margin_top: 50.0,
            margin_bottom: 80.0,
            margin_left: side,
            margin_right: side,
            logo: Placement {
                x: 250.0,
                y: page_height - 55.0,
                width: 100.0,
                height: 50.0,
            },
            footer: Placement {
                x: 50.0,
                y: 5.0,
                width: 500.0,
                height: 80.0,
            },
        }
    }
}

/// What to do when the body is still too tall at `min_scale`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Render at `min_scale` and clip whatever falls below the frame.
    #[default]
    Clip,
    /// Abort with `Error::Overflow`.
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    pub geometry: PageGeometry,
    pub uppercase_title: bool,
    /// Smallest uniform shrink factor applied to the body.
    pub min_scale: f32,
    pub overflow: OverflowPolicy,
}

impl RenderOptions {
    pub const DEFAULT_MIN_SCALE: f32 = 0.25;
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            uppercase_title: true,
            min_scale: Self::DEFAULT_MIN_SCALE,
            overflow: OverflowPolicy::Clip,
        }
    }
}
