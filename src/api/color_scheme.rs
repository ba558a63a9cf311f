use crate::render::Color;

/// Resolved colors of one scheme, copied into every view on a re-style pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPalette {
    pub background: Color,
    pub grid: Color,
    pub text: Color,
    pub slider_background: Color,
    pub slider_thumb: Color,
    pub slider_arrow: Color,
}

impl ColorPalette {
    pub fn validate(self) -> crate::error::ChartResult<()> {
        for color in [
            self.background,
            self.grid,
            self.text,
            self.slider_background,
            self.slider_thumb,
            self.slider_arrow,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}

/// Capability supplying the named colors of a visual theme.
pub trait ColorScheme {
    fn background(&self) -> Color;
    fn grid(&self) -> Color;
    fn text(&self) -> Color;
    /// Dimming drawn over the overview outside the selection.
    fn slider_background(&self) -> Color;
    fn slider_thumb(&self) -> Color;
    fn slider_arrow(&self) -> Color;

    fn palette(&self) -> ColorPalette {
        ColorPalette {
            background: self.background(),
            grid: self.grid(),
            text: self.text(),
            slider_background: self.slider_background(),
            slider_thumb: self.slider_thumb(),
            slider_arrow: self.slider_arrow(),
        }
    }
}

const fn rgb8(red: u8, green: u8, blue: u8) -> Color {
    Color::rgb(
        red as f64 / 255.0,
        green as f64 / 255.0,
        blue as f64 / 255.0,
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DayScheme;

impl ColorScheme for DayScheme {
    fn background(&self) -> Color {
        rgb8(0xFF, 0xFF, 0xFF)
    }

    fn grid(&self) -> Color {
        rgb8(0xE1, 0xE2, 0xE3)
    }

    fn text(&self) -> Color {
        rgb8(0x96, 0xA2, 0xAA)
    }

    fn slider_background(&self) -> Color {
        Color {
            alpha: 0.6,
            ..rgb8(0xF5, 0xF8, 0xF9)
        }
    }

    fn slider_thumb(&self) -> Color {
        rgb8(0xC0, 0xD1, 0xE1)
    }

    fn slider_arrow(&self) -> Color {
        rgb8(0xFF, 0xFF, 0xFF)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NightScheme;

impl ColorScheme for NightScheme {
    fn background(&self) -> Color {
        rgb8(0x24, 0x2F, 0x3E)
    }

    fn grid(&self) -> Color {
        rgb8(0x31, 0x3D, 0x4D)
    }

    fn text(&self) -> Color {
        rgb8(0x54, 0x67, 0x78)
    }

    fn slider_background(&self) -> Color {
        Color {
            alpha: 0.6,
            ..rgb8(0x1B, 0x24, 0x33)
        }
    }

    fn slider_thumb(&self) -> Color {
        rgb8(0x56, 0x62, 0x6D)
    }

    fn slider_arrow(&self) -> Color {
        rgb8(0xFF, 0xFF, 0xFF)
    }
}
