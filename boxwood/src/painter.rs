// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint scheduling: inline on the caller's thread, or serialized on one worker thread.

use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use boxwood_render::{Canvas, DisplayList, DisplaySurface, Viewport};
use tracing::{debug, trace, warn};

use crate::config::PaintMode;
use crate::error::EngineResult;

/// Everything a paint needs, captured by value.
#[derive(Debug)]
pub(crate) struct PaintJob {
    pub(crate) list: DisplayList,
    pub(crate) viewport: Viewport,
}

enum Message {
    Paint(PaintJob),
    Flush(Sender<()>),
}

pub(crate) enum Painter<S> {
    Inline { canvas: Canvas, surface: S },
    Background(Worker),
}

impl<S: DisplaySurface + Send + 'static> Painter<S> {
    pub(crate) fn new(mode: PaintMode, surface: S) -> EngineResult<Self> {
        Ok(match mode {
            PaintMode::Inline => Self::Inline {
                canvas: Canvas::new(),
                surface,
            },
            PaintMode::Background => Self::Background(Worker::spawn(surface)?),
        })
    }

    pub(crate) fn submit(&mut self, job: PaintJob) {
        match self {
            Self::Inline { canvas, surface } => run_job(canvas, surface, job),
            Self::Background(worker) => worker.submit(job),
        }
    }

    /// Block until every submitted job has been presented.
    pub(crate) fn flush(&self) {
        if let Self::Background(worker) = self {
            worker.flush();
        }
    }

    pub(crate) fn shutdown(&mut self) {
        if let Self::Background(worker) = self {
            worker.shutdown();
        }
    }
}

fn run_job<S: DisplaySurface>(canvas: &mut Canvas, surface: &mut S, job: PaintJob) {
    let start = Instant::now();
    let frame = canvas.paint(&job.list, job.viewport);
    if frame.is_empty() {
        return;
    }
    surface.present(frame);
    trace!(
        items = job.list.len(),
        width = frame.width,
        height = frame.height,
        elapsed_us = start.elapsed().as_micros(),
        "frame presented"
    );
}

pub(crate) struct Worker {
    tx: Option<Sender<Message>>,
    join: Option<JoinHandle<()>>,
}

impl Worker {
    fn spawn<S: DisplaySurface + Send + 'static>(mut surface: S) -> EngineResult<Self> {
        let (tx, rx) = mpsc::channel::<Message>();
        let join = thread::Builder::new()
            .name("boxwood-paint".into())
            .spawn(move || {
                let mut canvas = Canvas::new();
                for message in rx {
                    match message {
                        Message::Paint(job) => run_job(&mut canvas, &mut surface, job),
                        Message::Flush(ack) => {
                            let _ = ack.send(());
                        }
                    }
                }
                debug!("paint worker exiting");
            })?;
        debug!("paint worker started");
        Ok(Self {
            tx: Some(tx),
            join: Some(join),
        })
    }

    fn submit(&self, job: PaintJob) {
        let Some(tx) = &self.tx else {
            warn!("paint worker stopped; dropping paint job");
            return;
        };
        if tx.send(Message::Paint(job)).is_err() {
            warn!("paint worker gone; dropping paint job");
        }
    }

    fn flush(&self) {
        let Some(tx) = &self.tx else {
            return;
        };
        let (ack_tx, ack_rx) = mpsc::channel();
        if tx.send(Message::Flush(ack_tx)).is_ok() {
            // Err only if the worker died before answering.
            let _ = ack_rx.recv();
        }
    }

    fn shutdown(&mut self) {
        // Closing the channel ends the worker loop once queued jobs are done.
        drop(self.tx.take());
        if let Some(join) = self.join.take()
            && join.join().is_err()
        {
            warn!("paint worker panicked");
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
