//! Body mass index calculation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// BMI classification bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal Weight")]
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Bands are half-open: [0, 18.5), [18.5, 25), [25, 30), [30, inf).
    pub fn classify(bmi: f64) -> BmiCategory {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::NormalWeight
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BmiRequest {
    #[validate(range(
        exclusive_min = 0.0,
        max = 1000.0,
        message = "Weight must be a positive number of kilograms"
    ))]
    pub weight_kg: f64,

    #[validate(range(
        exclusive_min = 0.0,
        max = 300.0,
        message = "Height must be a positive number of centimeters"
    ))]
    pub height_cm: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BmiResult {
    /// Rounded to two decimals.
    pub bmi: f64,
    pub category: BmiCategory,
}

impl BmiRequest {
    pub fn compute(&self) -> BmiResult {
        let height_m = self.height_cm / 100.0;
        let bmi = (self.weight_kg / (height_m * height_m) * 100.0).round() / 100.0;
        BmiResult {
            bmi,
            category: BmiCategory::classify(bmi),
        }
    }
}
