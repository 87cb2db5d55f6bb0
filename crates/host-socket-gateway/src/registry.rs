//! Socket indices: `socketId -> extensionId` and `extensionId -> socketIds[]`,
//! plus each socket's subscribed-event set and outbound channel (§4.D).

use std::collections::{HashMap, HashSet};

use host_core_ports::{ExtensionId, SocketId};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

/// A single authenticated socket's routing state.
pub(crate) struct SocketEntry {
	pub extension_id: Option<ExtensionId>,
	pub subscribed_events: HashSet<String>,
	/// Whether the owning extension has a `process.started` instructions
	/// entry, i.e. whether disconnect should emit `extension.process.stopped`.
	pub is_long_lived: bool,
	/// `None` for a socket registered through the bare `register_socket`
	/// port call, which carries no channel to actually deliver bytes with.
	pub outbox: Option<UnboundedSender<Value>>,
}

/// In-memory index of every currently active socket.
#[derive(Default)]
pub(crate) struct SocketRegistry {
	sockets: HashMap<SocketId, SocketEntry>,
	by_extension: HashMap<ExtensionId, HashSet<SocketId>>,
	master: Option<SocketId>,
}

impl SocketRegistry {
	pub fn insert(&mut self, socket_id: SocketId, entry: SocketEntry) {
		if let Some(extension_id) = entry.extension_id.clone() {
			self.by_extension.entry(extension_id).or_default().insert(socket_id);
		} else {
			self.master = Some(socket_id);
		}
		self.sockets.insert(socket_id, entry);
	}

	pub fn remove(&mut self, socket_id: SocketId) -> Option<SocketEntry> {
		let entry = self.sockets.remove(&socket_id)?;
		if let Some(extension_id) = &entry.extension_id {
			if let Some(sockets) = self.by_extension.get_mut(extension_id) {
				sockets.remove(&socket_id);
				if sockets.is_empty() {
					self.by_extension.remove(extension_id);
				}
			}
		}
		if self.master == Some(socket_id) {
			self.master = None;
		}
		Some(entry)
	}

	pub fn has_master(&self) -> bool {
		self.master.is_some()
	}

	pub fn master_socket(&self) -> Option<SocketId> {
		self.master
	}

	pub fn get(&self, socket_id: SocketId) -> Option<&SocketEntry> {
		self.sockets.get(&socket_id)
	}

	/// Every socket eligible to receive a bus event with the given name and
	/// marker: the master (unmarked events only) plus any extension socket
	/// subscribed to the name whose extension id matches the marker, if any.
	pub fn deliverable(&self, event_name: &str, marker: Option<&str>) -> Vec<SocketId> {
		self.sockets
			.iter()
			.filter(|(_, entry)| match &entry.extension_id {
				None => marker.is_none(),
				Some(extension_id) => {
					entry.subscribed_events.contains(event_name)
						&& marker.map_or(true, |marker| marker == extension_id.as_str())
				}
			})
			.map(|(id, _)| *id)
			.collect()
	}
}
