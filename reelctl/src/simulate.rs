//! Replays a [`Script`] through a carousel runtime and writes every output
//! as a JSON line.
//!
//! With [`RendererMode::Ack`] a tween stands in for the renderer: animated
//! frames are played out in real time and acknowledged when they land,
//! racing the fallback timer exactly as a real renderer would.
//! With [`RendererMode::Silent`] nothing is acknowledged, so every move is
//! ended by the fallback timer.

use std::{io::Write, time::Duration};

use clap::ValueEnum;
use reel_core::{
    Carousel, CarouselHandle, CarouselRuntime, Easing, TrackFrame,
    TrackTween, TransitionStyle,
};
use serde::Serialize;
use tokio::{sync::watch, time::Instant};
use tracing::debug;

use crate::script::{Script, Step};

/// Render tick while waiting.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RendererMode {
    /// Animate committed frames and acknowledge when they finish.
    #[default]
    Ack,
    /// Never acknowledge; rely on the fallback timer.
    Silent,
}

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event {
    Frame {
        step: usize,
        #[serde(flatten)]
        frame: TrackFrame,
    },
    Live {
        step: usize,
        offset: Option<f32>,
    },
    Rendered {
        step: usize,
        index: i64,
    },
    Done {
        index: i64,
        logical_index: usize,
        transitioning: bool,
    },
}

struct Simulator<'w, W: Write> {
    handle: CarouselHandle,
    frames: watch::Receiver<TrackFrame>,
    live: watch::Receiver<Option<f32>>,
    renderer: RendererMode,
    tween: TrackTween,
    duration: Duration,
    easing: Easing,
    step: usize,
    out: &'w mut W,
}

/// Run `script` against `carousel`, mounting it at `viewport_width`.
pub async fn run<W: Write>(
    carousel: Carousel,
    viewport_width: f32,
    script: &Script,
    renderer: RendererMode,
    out: &mut W,
) -> anyhow::Result<Carousel> {
    let duration = carousel.settings().transition_duration;
    let easing = carousel.settings().easing;
    let (handle, task) = CarouselRuntime::spawn(carousel);

    let mut sim = Simulator {
        frames: handle.frames(),
        live: handle.live_offsets(),
        handle,
        renderer,
        tween: TrackTween::new(),
        duration,
        easing,
        step: 0,
        out,
    };

    let mounted = *sim.frames.borrow_and_update();
    sim.observe(mounted);
    sim.emit(&Event::Frame {
        step: 0,
        frame: mounted,
    })?;
    sim.handle.measured(viewport_width).await?;
    sim.sync().await?;

    for (i, step) in script.steps.iter().enumerate() {
        sim.step = i + 1;
        debug!(step = sim.step, ?step, "replaying");
        sim.apply(step).await?;
    }

    let status = sim.handle.status().await?;
    sim.emit(&Event::Done {
        index: status.index,
        logical_index: status.logical_index,
        transitioning: status.transitioning,
    })?;

    sim.handle.shutdown();
    let carousel = CarouselRuntime::join(task).await?;
    Ok(carousel)
}

impl<W: Write> Simulator<'_, W> {
    async fn apply(&mut self, step: &Step) -> anyhow::Result<()> {
        match (step, step.message()) {
            (Step::Wait { duration }, _) => self.wait(*duration).await,
            (_, Some(message)) => {
                self.handle.send(message).await?;
                self.sync().await
            }
            (_, None) => Ok(()),
        }
    }

    /// Wait for the runtime to apply everything queued, then publish.
    async fn sync(&mut self) -> anyhow::Result<()> {
        self.handle.status().await?;
        self.drain()
    }

    async fn wait(&mut self, duration: Duration) -> anyhow::Result<()> {
        let deadline = Instant::now() + duration;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            tokio::time::sleep((deadline - now).min(FRAME)).await;
            self.render_tick().await?;
            self.drain()?;
        }
    }

    async fn render_tick(&mut self) -> anyhow::Result<()> {
        if !self.tween.is_active() {
            return Ok(());
        }
        let now = std::time::Instant::now();
        if self.tween.tick(now).is_some() && !self.tween.is_active() {
            let index = self.handle.frame().index;
            self.emit(&Event::Rendered {
                step: self.step,
                index,
            })?;
            self.handle.transition_end().await?;
            self.sync().await?;
        }
        Ok(())
    }

    fn drain(&mut self) -> anyhow::Result<()> {
        if self.frames.has_changed()? {
            let frame = *self.frames.borrow_and_update();
            self.observe(frame);
            self.emit(&Event::Frame {
                step: self.step,
                frame,
            })?;
        }
        if self.live.has_changed()? {
            let offset = *self.live.borrow_and_update();
            self.emit(&Event::Live {
                step: self.step,
                offset,
            })?;
        }
        Ok(())
    }

    fn observe(&mut self, frame: TrackFrame) {
        match (self.renderer, frame.transition) {
            (RendererMode::Ack, TransitionStyle::Animated { .. }) => {
                self.tween.retarget(
                    frame.offset,
                    self.duration,
                    self.easing,
                    std::time::Instant::now(),
                );
            }
            _ => self.tween.snap(frame.offset),
        }
    }

    fn emit(&mut self, event: &Event) -> anyhow::Result<()> {
        serde_json::to_writer(&mut *self.out, event)?;
        writeln!(self.out)?;
        Ok(())
    }
}
