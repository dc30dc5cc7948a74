use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use scroller_core::{Activation, Dispatcher, ScrollerConfig, SimulatedPage, Step};

use crate::script::PageScript;

/// Something worth printing while a script plays
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Trigger {
        region: String,
        outcome: &'static str,
        target: Option<f64>,
        duration_ms: Option<u64>,
    },
    Resize,
    Write {
        at_ms: u64,
        x: f64,
        y: f64,
    },
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Trigger {
                region,
                outcome,
                target,
                duration_ms,
            } => {
                write!(f, "trigger {:<12} {}", region, outcome)?;
                if let Some(target) = target {
                    write!(f, " -> {}", target)?;
                }
                if let Some(ms) = duration_ms {
                    write!(f, " over {}ms", ms)?;
                }
                Ok(())
            }
            Event::Resize => write!(f, "resize"),
            Event::Write { at_ms, x, y } => write!(f, "  {:>6}ms  scroll ({}, {})", at_ms, x, y),
        }
    }
}

/// Plays a script against a dispatcher, collecting events
pub struct Player {
    dispatcher: Dispatcher<SimulatedPage>,
    interval: Duration,
    seen_writes: usize,
    events: Vec<Event>,
}

impl Player {
    pub fn new(config: &ScrollerConfig, script: &PageScript) -> Self {
        let page = script.page(&config.attribute_area);
        Self {
            dispatcher: Dispatcher::new(page, config.clone()),
            interval: config.frame_interval(),
            seen_writes: 0,
            events: Vec::new(),
        }
    }

    pub fn trigger(&mut self, region: &str, raw_duration: Option<&str>) -> Result<()> {
        let activation = self.dispatcher.trigger(region, raw_duration)?;
        let (outcome, target, duration_ms) = match activation {
            Activation::Started { target, duration } => {
                ("started", Some(target), Some(duration.as_millis() as u64))
            }
            Activation::Completed { target } => ("jumped", Some(target), None),
            Activation::Suppressed => ("suppressed", None, None),
            Activation::Unresolved => ("unresolved", None, None),
        };
        self.events.push(Event::Trigger {
            region: region.to_string(),
            outcome,
            target,
            duration_ms,
        });
        self.collect_writes();
        Ok(())
    }

    pub fn resize(&mut self, resize: &crate::script::ResizeSpec) {
        resize.apply(self.dispatcher.host_mut());
        self.dispatcher.notify_resized();
        self.events.push(Event::Resize);
    }

    /// Deliver one pending frame. Returns false when nothing was pending.
    pub fn frame(&mut self) -> bool {
        if !self.dispatcher.host_mut().take_frame() {
            return false;
        }
        let now = self.dispatcher.host_mut().advance(self.interval);
        let step = self.dispatcher.on_frame(now);
        self.collect_writes();
        step != Step::Idle
    }

    pub fn has_pending_frames(&self) -> bool {
        self.dispatcher.host().pending_frames() > 0
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Take the events collected since the last call
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    fn collect_writes(&mut self) {
        let host = self.dispatcher.host();
        let at_ms = scroller_core::FrameScheduler::now(host).as_millis() as u64;
        for write in &host.writes()[self.seen_writes..] {
            self.events.push(Event::Write {
                at_ms,
                x: write.x,
                y: write.y,
            });
        }
        self.seen_writes = host.writes().len();
    }
}

pub async fn run(config: &ScrollerConfig, path: &Path, realtime: bool, json: bool) -> Result<()> {
    let script = PageScript::load(path)?;
    let mut player = Player::new(config, &script);
    let mut ticker = tokio::time::interval(player.interval());

    let print = |events: Vec<Event>| -> Result<()> {
        for event in events {
            if json {
                println!("{}", serde_json::to_string(&event)?);
            } else {
                println!("{}", event);
            }
        }
        Ok(())
    };

    for step in &script.steps {
        if let Some(region) = &step.trigger {
            let raw = step.duration.as_ref().map(|d| d.as_raw());
            player.trigger(region, raw.as_deref())?;
        }
        if let Some(resize) = &step.resize {
            player.resize(resize);
        }
        if let Some(frames) = step.frames {
            for _ in 0..frames {
                if realtime {
                    ticker.tick().await;
                }
                if !player.frame() {
                    break;
                }
            }
        }
        print(player.drain_events())?;
    }

    // Let the last animation finish
    while player.has_pending_frames() {
        if realtime {
            ticker.tick().await;
        }
        player.frame();
    }
    print(player.drain_events())?;

    Ok(())
}
