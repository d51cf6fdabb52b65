//! # Events Module
//!
//! Event-driven progress reporting for hosts that run the scan on a
//! worker thread.
//!
//! ## Design
//! The pipeline emits events through channels, so any UI (CLI, GUI) can
//! subscribe and display progress without sharing the statistics.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Scan(ScanEvent::Progress(p)) = event {
//!             println!("{}", p.message);
//!         }
//!     }
//! });
//!
//! pipeline.run_with_events(&sender, &CancellationToken::new());
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
