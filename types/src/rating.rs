use std::fmt::Display;

pub const MAX_STARS: u8 = 5;

/// How a rating is drawn as a row of five stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    /// `full = floor(r)`, a half star when the fractional part is at least
    /// 0.5, and `empty = 5 - ceil(r)`. Ratings outside 0..=5 are clamped first
    /// so the three parts always add up to five.
    pub fn from_rating(rating: f64) -> Self {
        let rating = if rating.is_nan() {
            0.0
        } else {
            rating.clamp(0.0, f64::from(MAX_STARS))
        };
        let full = rating.floor() as u8;
        let half = rating % 1.0 >= 0.5;
        let empty = MAX_STARS - rating.ceil() as u8;
        // A fraction below one half rounds up for the empty count but draws
        // no half star, leaving one unit unaccounted for.
        let empty = if full + u8::from(half) + empty < MAX_STARS {
            MAX_STARS - full - u8::from(half)
        } else {
            empty
        };
        Self { full, half, empty }
    }

    pub fn total(&self) -> u8 {
        self.full + u8::from(self.half) + self.empty
    }
}

impl Display for StarRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for _ in 0..self.full {
            write!(f, "\u{2605}")?;
        }
        if self.half {
            write!(f, "\u{2BE8}")?;
        }
        for _ in 0..self.empty {
            write!(f, "\u{2606}")?;
        }
        Ok(())
    }
}
