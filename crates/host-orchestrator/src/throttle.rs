//! Per-`(extensionId, event)` sliding-window throttle gate (§4.F
//! "Throttling"): at most `maximumCount` deliveries within any window of
//! `durationMs`; excess callers suspend until a slot opens.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use host_core_ports::{ExtensionId, ManifestEvent, ThrottlingPolicy};
use tokio::sync::{Mutex, Notify};

/// Guards every `(extensionId, event)` sliding window the host tracks.
///
/// Matches the supervisor's suspend/resume idiom: a `Mutex`-guarded table
/// of windows plus a single `Notify` woken whenever any slot opens, so a
/// suspended `acquire` call re-checks its own window rather than assuming
/// the wakeup was meant for it.
#[derive(Default)]
pub struct ThrottleGate {
	windows: Mutex<HashMap<(ExtensionId, ManifestEvent), VecDeque<Instant>>>,
	notify: Notify,
}

impl ThrottleGate {
	/// Suspends until a delivery slot for `(extension_id, event)` is free
	/// under `policy`, then records the delivery and returns.
	pub async fn acquire(&self, extension_id: &ExtensionId, event: ManifestEvent, policy: &ThrottlingPolicy) {
		let window = Duration::from_millis(policy.duration_ms.max(0) as u64);
		let key = (extension_id.clone(), event);

		loop {
			let wait = {
				let mut windows = self.windows.lock().await;
				let deque = windows.entry(key.clone()).or_default();
				prune_expired(deque, window);

				if deque.len() < policy.maximum_count as usize {
					deque.push_back(Instant::now());
					None
				} else {
					let oldest = *deque.front().expect("len >= maximum_count > 0 implies non-empty");
					Some(window.saturating_sub(oldest.elapsed()))
				}
			};

			let Some(wait) = wait else { break };
			tokio::select! {
				() = tokio::time::sleep(wait) => {}
				() = self.notify.notified() => {}
			}
		}
	}

	/// Releases one slot early (a throttled delivery completed faster than
	/// its window would have), waking any other waiter to re-check.
	pub fn notify_slot_released(&self) {
		self.notify.notify_waiters();
	}
}

fn prune_expired(deque: &mut VecDeque<Instant>, window: Duration) {
	while let Some(&front) = deque.front() {
		if front.elapsed() >= window {
			deque.pop_front();
		} else {
			break;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use std::time::Duration;

	fn policy(duration_ms: i64, maximum_count: u32) -> ThrottlingPolicy {
		ThrottlingPolicy {
			events: vec![ManifestEvent::ImageComputeTags],
			duration_ms,
			maximum_count,
		}
	}

	#[tokio::test]
	async fn admits_up_to_the_maximum_count_immediately() {
		let gate = ThrottleGate::default();
		let extension_id = ExtensionId::parse("tagger").unwrap();
		let policy = policy(10_000, 2);

		let start = Instant::now();
		gate.acquire(&extension_id, ManifestEvent::ImageComputeTags, &policy).await;
		gate.acquire(&extension_id, ManifestEvent::ImageComputeTags, &policy).await;
		assert!(start.elapsed() < Duration::from_millis(100));
	}

	#[tokio::test]
	async fn a_third_delivery_waits_for_the_window_to_clear() {
		let gate = Arc::new(ThrottleGate::default());
		let extension_id = ExtensionId::parse("tagger").unwrap();
		let policy = policy(200, 1);

		gate.acquire(&extension_id, ManifestEvent::ImageComputeTags, &policy).await;

		let start = Instant::now();
		gate.acquire(&extension_id, ManifestEvent::ImageComputeTags, &policy).await;
		assert!(start.elapsed() >= Duration::from_millis(150));
	}

	#[tokio::test]
	async fn distinct_extensions_have_independent_windows() {
		let gate = ThrottleGate::default();
		let tagger = ExtensionId::parse("tagger").unwrap();
		let other = ExtensionId::parse("other").unwrap();
		let policy = policy(10_000, 1);

		gate.acquire(&tagger, ManifestEvent::ImageComputeTags, &policy).await;
		let start = Instant::now();
		gate.acquire(&other, ManifestEvent::ImageComputeTags, &policy).await;
		assert!(start.elapsed() < Duration::from_millis(100));
	}
}
