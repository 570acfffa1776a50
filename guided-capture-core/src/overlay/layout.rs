/// Proportions of the alignment guide, as fractions of the viewport.
///
/// Stroke width and the instruction block metrics are in points; everything
/// that positions a guide line is a fraction so the guide keeps its shape on
/// any screen size or orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayout {
    /// Width of the horizontal guide relative to the viewport width (default: 0.8).
    pub horizontal_span: f32,

    /// Distance of each vertical guide from its side edge (default: 0.3).
    pub vertical_inset: f32,

    /// Where the vertical guides start, from the top (default: 0.15).
    pub vertical_top: f32,

    /// Where the vertical guides end, from the bottom (default: 0.15).
    pub vertical_bottom: f32,

    /// Guide stroke width in points (default: 2.0).
    pub stroke_width: f32,

    /// Preferred offset of the instruction block from the top edge (default: 20.0).
    pub instructions_top: f32,

    /// Width of the instruction block relative to the viewport width (default: 0.35).
    pub instructions_width: f32,

    pub instruction_line_height: f32,
    pub instruction_padding: f32,
}

impl OverlayLayout {
    pub fn validate(&self) -> Result<(), String> {
        let fractions = [
            ("horizontal span", self.horizontal_span),
            ("vertical inset", self.vertical_inset),
            ("vertical top", self.vertical_top),
            ("vertical bottom", self.vertical_bottom),
            ("instructions width", self.instructions_width),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be a fraction in 0..=1, got {}", name, value));
            }
        }
        if self.vertical_inset >= 0.5 {
            return Err(format!("vertical inset must be below 0.5, got {}", self.vertical_inset));
        }
        if self.vertical_top + self.vertical_bottom >= 1.0 {
            return Err("vertical guides have no height".into());
        }
        if self.stroke_width <= 0.0 {
            return Err(format!("stroke width must be positive, got {}", self.stroke_width));
        }
        if self.instructions_top < 0.0 || self.instruction_line_height <= 0.0 || self.instruction_padding < 0.0 {
            return Err("instruction block metrics must be non-negative".into());
        }
        Ok(())
    }
}

impl Default for OverlayLayout {
    fn default() -> Self {
        Self {
            horizontal_span: 0.8,
            vertical_inset: 0.3,
            vertical_top: 0.15,
            vertical_bottom: 0.15,
            stroke_width: 2.0,
            instructions_top: 20.0,
            instructions_width: 0.35,
            instruction_line_height: 17.0,
            instruction_padding: 8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_valid() {
        assert!(OverlayLayout::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_fractions() {
        let layout = OverlayLayout {
            horizontal_span: 1.2,
            ..Default::default()
        };
        assert!(layout.validate().is_err());

        let crossed = OverlayLayout {
            vertical_inset: 0.5,
            ..Default::default()
        };
        assert!(crossed.validate().is_err());

        let flat = OverlayLayout {
            vertical_top: 0.5,
            vertical_bottom: 0.5,
            ..Default::default()
        };
        assert!(flat.validate().is_err());
    }
}
