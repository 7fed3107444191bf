use qrcode::render::unicode::Dense1x2;
use qrcode::types::QrError;
use qrcode::QrCode;

/// Pre-rendered QR symbol, two modules per terminal row.
#[derive(Debug, Clone, PartialEq)]
pub struct QrView {
    lines: Vec<String>,
    width: u16,
}

impl QrView {
    pub fn encode(payload: &str) -> Result<Self, QrError> {
        let code = QrCode::new(payload.as_bytes())?;
        // Inverted so the symbol reads correctly on dark terminals.
        let image = code
            .render::<Dense1x2>()
            .dark_color(Dense1x2::Light)
            .light_color(Dense1x2::Dark)
            .quiet_zone(true)
            .build();

        let lines: Vec<String> = image.lines().map(str::to_string).collect();
        let width = lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0) as u16;
        Ok(Self { lines, width })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.lines.len() as u16
    }

    pub fn fits(&self, width: u16, height: u16) -> bool {
        self.width <= width && self.height() <= height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_square_symbol_in_half_blocks() {
        let view = QrView::encode("ABC123").expect("encodable");
        // Version 1 is 21 modules plus a 4-module quiet zone on each side.
        assert_eq!(view.width(), 29);
        assert_eq!(view.height(), 15);
        assert!(view.lines().iter().all(|l| l.chars().count() == 29));
    }

    #[test]
    fn long_pairing_payload_still_encodes() {
        let payload = format!(
            "2@{},{},{},{}",
            "A".repeat(80),
            "B".repeat(44),
            "C".repeat(44),
            "D".repeat(24)
        );
        let view = QrView::encode(&payload).expect("encodable");
        assert!(!view.fits(40, 20));
        assert!(view.fits(200, 200));
    }

    #[test]
    fn oversized_payload_is_rejected() {
        assert!(QrView::encode(&"x".repeat(5000)).is_err());
    }
}
