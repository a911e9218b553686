//! Dice-face images for rendering a roll.
//!
//! Images live at `<assets>/<style>/d<sides>/d<sides>s<value>.png`. A face
//! without an image falls back to text.

use std::fmt;
use std::path::PathBuf;

use td_mechanics::DiceRollResult;

/// Looks up face images under an assets directory.
#[derive(Debug, Clone)]
pub struct DiceFaces {
    assets_dir: PathBuf,
}

/// One rolled die, with its image if one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DieFace {
    /// Sides on the die.
    pub sides: u32,
    /// Rolled value.
    pub value: u32,
    /// Image file, when present on disk.
    pub path: Option<PathBuf>,
}

impl fmt::Display for DieFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}", path.display()),
            None => write!(f, "D{} {}", self.sides, self.value),
        }
    }
}

impl DiceFaces {
    /// Faces under `assets_dir`.
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    /// Where the image for one face would be.
    pub fn face_path(&self, style: &str, sides: u32, value: u32) -> PathBuf {
        self.assets_dir
            .join(style)
            .join(format!("d{sides}"))
            .join(format!("d{sides}s{value}.png"))
    }

    /// Faces for every die in a roll.
    pub fn faces(&self, style: &str, roll: &DiceRollResult) -> Vec<DieFace> {
        let sides = roll.expression.sides;
        roll.rolls
            .iter()
            .map(|&value| {
                let path = self.face_path(style, sides, value);
                let path = if path.is_file() {
                    Some(path)
                } else {
                    tracing::debug!(path = %path.display(), "no face image");
                    None
                };
                DieFace { sides, value, path }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_mechanics::DiceExpression;
    use tempfile::TempDir;

    fn roll_of(rolls: Vec<u32>) -> DiceRollResult {
        let expr: DiceExpression = "2d20".parse().unwrap();
        DiceRollResult::new(expr, rolls)
    }

    #[test]
    fn face_path_layout() {
        let faces = DiceFaces::new("assets/dice_images");
        assert_eq!(
            faces.face_path("gold", 20, 15),
            PathBuf::from("assets/dice_images/gold/d20/d20s15.png")
        );
    }

    #[test]
    fn missing_images_fall_back_to_text() {
        let dir = TempDir::new().unwrap();
        let faces = DiceFaces::new(dir.path());
        let got = faces.faces("gold", &roll_of(vec![15, 3]));
        assert_eq!(got.len(), 2);
        assert!(got.iter().all(|f| f.path.is_none()));
        assert_eq!(got[0].to_string(), "D20 15");
    }

    #[test]
    fn existing_images_are_found() {
        let dir = TempDir::new().unwrap();
        let faces = DiceFaces::new(dir.path());
        let path = faces.face_path("gold", 20, 15);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"png").unwrap();

        let got = faces.faces("gold", &roll_of(vec![15, 3]));
        assert_eq!(got[0].path.as_deref(), Some(path.as_path()));
        assert_eq!(got[1].path, None);
    }
}
