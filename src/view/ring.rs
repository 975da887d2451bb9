//! Circular progress indicator geometry

use serde::{Deserialize, Serialize};

use crate::state::Phase;

pub const RING_SIZE: f64 = 72.0;
pub const RING_STROKE: f64 = 2.5;

const PRIMARY_COLOR: &str = "#f59e0b";
const RECOVERY_COLOR: &str = "#34d399";

/// Stroke parameters for drawing the progress ring of an active tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingView {
    pub size: f64,
    pub stroke: f64,
    pub radius: f64,
    pub circumference: f64,
    pub dash_offset: f64,
    pub color: String,
}

impl RingView {
    pub fn new(progress_percent: f64, phase: Phase) -> Self {
        let radius = (RING_SIZE - RING_STROKE) / 2.0;
        let circumference = 2.0 * std::f64::consts::PI * radius;
        let color = match phase {
            Phase::Primary => PRIMARY_COLOR,
            Phase::Recovery => RECOVERY_COLOR,
        };

        Self {
            size: RING_SIZE,
            stroke: RING_STROKE,
            radius,
            circumference,
            dash_offset: circumference - (progress_percent / 100.0) * circumference,
            color: color.to_string(),
        }
    }
}
