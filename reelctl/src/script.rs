use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use reel_core::{CarouselMessage, DragFrame, TransitionEnd};
use serde::Deserialize;

/// A recorded sequence of input events.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    /// Sequence length; overrides the configured sample track.
    #[serde(default)]
    pub items: Option<usize>,
    /// Width reported on mount; overrides the configured sample track.
    #[serde(default)]
    pub viewport_width: Option<f32>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Prev,
    Next,
    GoTo {
        index: usize,
    },
    /// Pointer held at `movement_x` px from where the drag started.
    Drag {
        movement_x: f32,
    },
    Release {
        movement_x: f32,
        #[serde(default)]
        velocity: f32,
        /// Defaults to the sign of `movement_x`.
        #[serde(default)]
        direction_x: Option<f32>,
    },
    Measure {
        width: f32,
    },
    VisibleItems {
        count: usize,
    },
    /// Let time pass; the renderer and fallback timer keep running.
    Wait {
        #[serde(with = "reel_config::duration")]
        duration: Duration,
    },
    /// Explicit renderer acknowledgement.
    TransitionEnd,
}

impl Step {
    /// The carousel message for this step; `None` for waits.
    pub fn message(&self) -> Option<CarouselMessage> {
        let message = match *self {
            Step::Prev => CarouselMessage::Prev,
            Step::Next => CarouselMessage::Next,
            Step::GoTo { index } => CarouselMessage::GoTo(index),
            Step::Drag { movement_x } => {
                CarouselMessage::Drag(DragFrame::held(movement_x))
            }
            Step::Release {
                movement_x,
                velocity,
                direction_x,
            } => {
                let direction =
                    direction_x.unwrap_or_else(|| sign_of(movement_x));
                CarouselMessage::Drag(DragFrame::release(
                    movement_x, velocity, direction,
                ))
            }
            Step::Measure { width } => CarouselMessage::Measured(width),
            Step::VisibleItems { count } => {
                CarouselMessage::SetVisibleItems(count)
            }
            Step::TransitionEnd => {
                CarouselMessage::TransitionEnd(TransitionEnd::Rendered)
            }
            Step::Wait { .. } => return None,
        };
        Some(message)
    }
}

fn sign_of(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl Script {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| {
            format!("failed to read script {}", path.display())
        })?;
        Self::parse(&raw)
            .with_context(|| format!("invalid script {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("failed to parse script json")
    }
}
