use std::collections::VecDeque;
use std::sync::OnceLock;
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};

/// Central output broker that owns every log line the autopilot prints.
/// Provides level filtering and batches summary lines into one block per cycle.
#[derive(Clone)]
pub struct OutputBroker {
    sender: mpsc::UnboundedSender<BrokerMessage>,
}

/// Output request that gets queued through the broker
pub struct OutputRequest {
    pub level: OutputLevel,
    pub message: String,
    pub timestamp: Instant,
}

enum BrokerMessage {
    Output(OutputRequest),
    Flush(oneshot::Sender<()>),
}

/// Output levels for filtering
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum OutputLevel {
    Error,      // Always shown
    Summary,    // Always shown, batched until the cycle summary is flushed
    Info,       // Level 1+
    Debug,      // Level 2+
    Trace,      // Level 2+
}

struct BrokerState {
    pending_summaries: VecDeque<String>,
    started: Instant,
}

impl OutputBroker {
    /// Create a new output broker and start the background processing loop.
    /// Must be called from inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(Self::broker_worker(receiver));
        Self { sender }
    }

    /// Queue a line. Falls back to printing directly if the worker has gone away.
    pub fn output(&self, level: OutputLevel, message: String) {
        let request = OutputRequest {
            level,
            message,
            timestamp: Instant::now(),
        };

        if let Err(mpsc::error::SendError(BrokerMessage::Output(request))) =
            self.sender.send(BrokerMessage::Output(request))
        {
            print_direct(&request.level, &request.message);
        }
    }

    /// Print every pending summary line and wait until the worker has caught up.
    pub async fn flush_summaries(&self) {
        let (response_sender, response_receiver) = oneshot::channel();
        if self.sender.send(BrokerMessage::Flush(response_sender)).is_ok() {
            let _ = response_receiver.await;
        }
    }

    async fn broker_worker(mut receiver: mpsc::UnboundedReceiver<BrokerMessage>) {
        let mut state = BrokerState {
            pending_summaries: VecDeque::new(),
            started: Instant::now(),
        };

        while let Some(message) = receiver.recv().await {
            match message {
                BrokerMessage::Output(request) => Self::handle_output(&mut state, request),
                BrokerMessage::Flush(done) => {
                    Self::flush_pending_summaries(&mut state);
                    let _ = done.send(());
                }
            }
        }

        Self::flush_pending_summaries(&mut state);
    }

    fn handle_output(state: &mut BrokerState, request: OutputRequest) {
        if !crate::verbosity::is_enabled(&request.level) {
            return;
        }

        match request.level {
            OutputLevel::Summary => {
                state.pending_summaries.push_back(request.message);
                if state.pending_summaries.len() > 200 {
                    state.pending_summaries.pop_front();
                }
            }
            OutputLevel::Trace => {
                let elapsed = request.timestamp.duration_since(state.started);
                println!("[+{:>8.3}s] {}", elapsed.as_secs_f64(), request.message);
            }
            _ => println!("{}", request.message),
        }
    }

    fn flush_pending_summaries(state: &mut BrokerState) {
        if state.pending_summaries.is_empty() {
            return;
        }

        println!("\n✈️ === CYCLE SUMMARY ===");
        while let Some(summary) = state.pending_summaries.pop_front() {
            println!("{}", summary);
        }
        println!("✈️ === END SUMMARY ===\n");
    }
}

fn print_direct(level: &OutputLevel, message: &str) {
    if crate::verbosity::is_enabled(level) {
        println!("{}", message);
    }
}

static GLOBAL_BROKER: OnceLock<OutputBroker> = OnceLock::new();

/// Get the global output broker instance
pub fn get_output_broker() -> &'static OutputBroker {
    GLOBAL_BROKER.get_or_init(OutputBroker::new)
}

/// Route a line through the broker when a runtime is available, otherwise print it.
pub fn emit(level: OutputLevel, message: String) {
    if tokio::runtime::Handle::try_current().is_ok() {
        get_output_broker().output(level, message);
    } else {
        print_direct(&level, &message);
    }
}

/// Flush the cycle summary if a broker was ever started.
pub async fn flush_summaries() {
    if let Some(broker) = GLOBAL_BROKER.get() {
        broker.flush_summaries().await;
    }
}

#[macro_export]
macro_rules! o_error {
    ($($arg:tt)*) => {
        $crate::output_broker::emit($crate::output_broker::OutputLevel::Error, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! o_summary {
    ($($arg:tt)*) => {
        $crate::output_broker::emit($crate::output_broker::OutputLevel::Summary, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! o_info {
    ($($arg:tt)*) => {
        $crate::output_broker::emit($crate::output_broker::OutputLevel::Info, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! o_debug {
    ($($arg:tt)*) => {
        $crate::output_broker::emit($crate::output_broker::OutputLevel::Debug, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! o_trace {
    ($($arg:tt)*) => {
        $crate::output_broker::emit($crate::output_broker::OutputLevel::Trace, format!($($arg)*))
    };
}
