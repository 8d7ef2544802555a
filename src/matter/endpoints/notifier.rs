//! Cluster change notifier for live Matter subscription updates.
//!
//! When a bridged attribute changes, the runtime's subscription processor
//! must be woken so the new value reaches controllers immediately.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use rs_matter::dm::{ClusterId, EndptId};

/// Signal shared between the bridge and the runtime's subscription processor.
pub type ChangeSignal = Signal<CriticalSectionRawMutex, ()>;

/// Notifies Matter subscriptions when an endpoint's attributes change.
///
/// # Usage
/// ```ignore
/// static CHANGES: ChangeSignal = Signal::new();
///
/// endpoint.set_notifier(ClusterNotifier::new(&CHANGES, 2));
/// // after every state change:
/// CHANGES.wait().await;
/// ```
#[derive(Clone, Copy)]
pub struct ClusterNotifier {
    signal: &'static ChangeSignal,
    endpoint_id: EndptId,
}

impl ClusterNotifier {
    /// Create a notifier for one endpoint.
    ///
    /// # Arguments
    /// * `signal` - Static signal that wakes the subscription processor
    /// * `endpoint_id` - Matter endpoint number
    pub fn new(signal: &'static ChangeSignal, endpoint_id: EndptId) -> Self {
        Self {
            signal,
            endpoint_id,
        }
    }

    pub fn endpoint_id(&self) -> EndptId {
        self.endpoint_id
    }

    /// Notify that data of `cluster_id` changed. Non-blocking.
    pub fn notify(&self, cluster_id: ClusterId) {
        log::trace!(
            "[Matter] Notify endpoint {} cluster 0x{:04X}",
            self.endpoint_id,
            cluster_id
        );
        self.signal.signal(());
    }
}
