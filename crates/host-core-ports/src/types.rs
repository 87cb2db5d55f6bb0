//! Domain types shared by every port in the extension host
//!
//! These are the nouns from the data model: manifests, the runtime
//! extension record, API key entries, bus event names, throttle and
//! pending-call bookkeeping. Strong newtypes are used throughout so a
//! `SocketId` can never be handed where a `ContextId` is expected.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Short identifier for an extension, pattern `[A-Za-z0-9._-]{1,32}`.
///
/// Validated once at the edge (manifest parsing); everywhere else it is
/// trusted to already satisfy the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionId(String);

impl ExtensionId {
	/// Regex for the id pattern, compiled once.
	fn pattern() -> &'static regex::Regex {
		static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
		RE.get_or_init(|| regex::Regex::new(r"^[A-Za-z0-9._-]{1,32}$").expect("static pattern"))
	}

	/// Validates and wraps a candidate id string.
	///
	/// # Errors
	/// Returns an error string naming the violated constraint.
	pub fn parse(candidate: impl Into<String>) -> Result<Self, String> {
		let candidate = candidate.into();
		if Self::pattern().is_match(&candidate) {
			Ok(Self(candidate))
		} else {
			Err(format!(
				"extension id '{candidate}' does not match [A-Za-z0-9._-]{{1,32}}"
			))
		}
	}

	/// Borrows the underlying string.
	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for ExtensionId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// Identifier for a live gateway socket connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketId(pub Uuid);

impl SocketId {
	/// Generates a fresh socket id.
	#[must_use]
	pub fn new() -> Self {
		Self(Uuid::new_v4())
	}
}

impl Default for SocketId {
	fn default() -> Self {
		Self::new()
	}
}

/// Per-delivery context id attached to every outbound bus event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextId(pub Uuid);

impl ContextId {
	/// Generates a fresh context id.
	#[must_use]
	pub fn new() -> Self {
		Self(Uuid::new_v4())
	}
}

impl Default for ContextId {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Display for ContextId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Single-use callback name id (`return|<callbackId>`) for a result sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallbackId(pub Uuid);

impl CallbackId {
	/// Generates a fresh callback id.
	#[must_use]
	pub fn new() -> Self {
		Self(Uuid::new_v4())
	}

	/// The bus event name a callee must publish to resolve this callback.
	#[must_use]
	pub fn return_event_name(&self) -> String {
		format!("return|{}", self.0)
	}
}

impl Default for CallbackId {
	fn default() -> Self {
		Self::new()
	}
}

/// Closed set of runtime environments an extension executable targets.
///
/// Selects which placeholder (`${node}`, `${venvPython}`, `${shell}`)
/// the supervisor substitutes for the `executable` argument token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuntimeEnvironment {
	/// Node.js runtime, invoked by direct fork of the `node` binary.
	Node,
	/// Python virtual environment interpreter.
	VenvPython,
	/// Invocation through a shell.
	Shell,
	/// A self-contained native executable, spawned directly.
	Native,
}

/// The closed set of manifest-declared bus-facing events.
///
/// Mirrors the manifest-event -> bus-event table in the external
/// interfaces section; the variant names are the manifest-side names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ManifestEvent {
	ProcessStarted,
	ProcessRunCommand,
	ExtensionSettings,
	ImageCreated,
	ImageUpdated,
	ImageDeleted,
	ImageComputeFeatures,
	ImageComputeEmbeddings,
	ImageComputeTags,
	ImageRunCommand,
	TextComputeEmbeddings,
}

impl ManifestEvent {
	/// The fixed manifest-event -> bus-event name mapping (external interfaces).
	#[must_use]
	pub fn bus_event_name(self) -> &'static str {
		match self {
			Self::ProcessStarted => "process.started",
			Self::ProcessRunCommand => "process.runCommand",
			Self::ExtensionSettings => "extension.settings",
			Self::ImageCreated => "image.created",
			Self::ImageUpdated => "image.updated",
			Self::ImageDeleted => "image.deleted",
			Self::ImageComputeFeatures => "image.computeFeatures",
			Self::ImageComputeEmbeddings => "image.computeEmbeddings",
			Self::ImageComputeTags => "image.computeTags",
			Self::ImageRunCommand => "image.runCommand",
			Self::TextComputeEmbeddings => "text.computeEmbeddings",
		}
	}
}

/// Closed set of coarse-grained service interfaces an extension may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
	ImageFeatures,
	ImageEmbeddings,
	ImageTags,
	TextEmbeddings,
}

impl Capability {
	/// The manifest events a manifest declaring this capability must also declare.
	#[must_use]
	pub fn required_events(self) -> &'static [ManifestEvent] {
		match self {
			Self::ImageFeatures => &[ManifestEvent::ProcessStarted, ManifestEvent::ImageComputeFeatures],
			Self::ImageEmbeddings => {
				&[ManifestEvent::ProcessStarted, ManifestEvent::ImageComputeEmbeddings]
			}
			Self::ImageTags => &[ManifestEvent::ProcessStarted, ManifestEvent::ImageComputeTags],
			Self::TextEmbeddings => {
				&[ManifestEvent::ProcessStarted, ManifestEvent::TextComputeEmbeddings]
			}
		}
	}

	/// The bus event the orchestrator emits to dispatch a `runCapability` call.
	#[must_use]
	pub fn dispatch_event_name(self) -> &'static str {
		match self {
			Self::ImageFeatures => "image.computeFeatures",
			Self::ImageEmbeddings => "image.computeEmbeddings",
			Self::ImageTags => "image.computeTags",
			Self::TextEmbeddings => "text.computeEmbeddings",
		}
	}
}

/// Entity a command is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CommandEntity {
	Process,
	Images,
	Image,
}

/// A user-invokable verb declared by an extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOn {
	pub entity: CommandEntity,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub with_tags: Vec<String>,
}

/// Locale/label/description tuple for a command's presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpecification {
	pub locale: String,
	pub label: String,
	pub description: String,
}

/// A command declared by an extension, unique per extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
	pub id: String,
	pub on: CommandOn,
	/// JSON-schema for the command's parameters, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub parameters: Option<serde_json::Value>,
	pub specifications: Vec<CommandSpecification>,
}

/// A throttling policy: at most `maximum_count` deliveries per `duration`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrottlingPolicy {
	pub events: Vec<ManifestEvent>,
	pub duration_ms: i64,
	pub maximum_count: u32,
}

/// Execution template for an instructions entry's child process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionTemplate {
	/// The executable token: a literal path, or one of `${node}`,
	/// `${shell}`, `${venvPython}`.
	pub executable: String,
	/// Argument tokens, each possibly containing `${placeholder}` variables.
	pub arguments: Vec<String>,
}

/// One instructions entry: binds an execution template to an event list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionsEntry {
	pub events: Vec<ManifestEvent>,
	#[serde(default)]
	pub capabilities: Vec<Capability>,
	#[serde(default)]
	pub throttling_policies: Vec<ThrottlingPolicy>,
	pub execution: ExecutionTemplate,
	#[serde(default)]
	pub commands: Vec<Command>,
}

impl InstructionsEntry {
	/// Whether this entry spawns a long-lived (`process.started`) child.
	#[must_use]
	pub fn is_long_lived(&self) -> bool {
		self.events.contains(&ManifestEvent::ProcessStarted)
	}
}

/// A single UI element contributed by the extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiElement {
	pub anchor: String,
	/// Path relative to the extension's install directory; must resolve
	/// to a file contained in the install archive.
	pub url: String,
}

/// `ui` block of a manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiBlock {
	#[serde(default)]
	pub elements: Vec<UiElement>,
}

/// The static description parsed from an extension archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
	pub id: ExtensionId,
	#[serde(with = "semver_serde")]
	pub version: semver::Version,
	pub name: String,
	pub description: String,
	pub runtimes: Vec<RuntimeEnvironment>,
	pub instructions: Vec<InstructionsEntry>,
	#[serde(default)]
	pub ui: UiBlock,
	/// JSON-schema describing the extension's settings document.
	pub settings: serde_json::Value,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon: Option<Vec<u8>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub manual: Option<String>,
}

mod semver_serde {
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	pub fn serialize<S: Serializer>(v: &semver::Version, s: S) -> Result<S::Ok, S::Error> {
		v.to_string().serialize(s)
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<semver::Version, D::Error> {
		let raw = String::deserialize(d)?;
		semver::Version::parse(&raw).map_err(serde::de::Error::custom)
	}
}

/// Lifecycle status of an installed extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtensionStatus {
	Enabled,
	Paused,
}

/// Connection activity of an extension's socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtensionActivity {
	Connecting,
	Connected,
	Error,
}

/// Runtime record for an installed extension: manifest plus host-owned state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extension {
	pub manifest: Manifest,
	pub status: ExtensionStatus,
	pub install_directory: PathBuf,
	pub is_built_in: bool,
	pub activity: ExtensionActivity,
}

impl Extension {
	/// The extension's id, borrowed from its manifest.
	#[must_use]
	pub fn id(&self) -> &ExtensionId {
		&self.manifest.id
	}
}

/// One image as the orchestrator's `synchronize`/`runImageCommand` checks
/// see it — the out-of-scope relational store's full record is opaque here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
	pub id: String,
	pub repository_id: String,
}

/// Scopes assigned to an API key.
pub type Scope = String;

/// An entry in the credential store's key table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyEntry {
	pub value: String,
	pub scopes: Vec<Scope>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extension_id: Option<ExtensionId>,
}

impl ApiKeyEntry {
	/// Scope `"all"`, granted only to the master key.
	pub const ALL_SCOPE: &'static str = "all";

	/// The fixed scope set granted to every extension key (external interfaces).
	#[must_use]
	pub fn extension_scopes() -> Vec<Scope> {
		[
			"extension:chrome:install",
			"extension:run",
			"extension:settings:read",
			"extension:settings:write",
			"image:attachment:write",
			"image:embeddings:write",
			"image:feature:write",
			"image:read",
			"image:tag:write",
			"repository:ensure",
			"repository:read",
			"repository:image:store",
		]
		.into_iter()
		.map(String::from)
		.collect()
	}
}

/// Entity/action[/state] components of a bus event name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventEntity {
	Process,
	Extension,
	Repository,
	Image,
	Text,
}

/// A bus event name, `entity.action[.state]`, validated at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusEventName(String);

impl BusEventName {
	/// Wraps a literal bus event name without validating the closed
	/// per-entity enums (used for the synthesized `return|<id>` names).
	#[must_use]
	pub fn from_literal(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	/// Builds a name from its dot-joined tokens.
	#[must_use]
	pub fn new(entity: &str, action: &str, state: Option<&str>) -> Self {
		match state {
			Some(state) => Self(format!("{entity}.{action}.{state}")),
			None => Self(format!("{entity}.{action}")),
		}
	}

	/// Borrows the full dotted name.
	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for BusEventName {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for BusEventName {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

/// Per-`(extensionId, event)` throttle bookkeeping.
#[derive(Debug, Clone)]
pub struct ThrottleState {
	pub last_delivery: Option<std::time::Instant>,
	pub count_in_window: u32,
	pub window_started: Option<std::time::Instant>,
}

impl Default for ThrottleState {
	fn default() -> Self {
		Self {
			last_delivery: None,
			count_in_window: 0,
			window_started: None,
		}
	}
}

/// A pending emit awaiting an inbound acknowledgment or result-sink reply.
pub struct PendingCall {
	pub context_id: ContextId,
	pub created_at_ms: u64,
	pub resolver: tokio::sync::oneshot::Sender<serde_json::Value>,
}

/// The supervisor's default graceful-stop grace period.
#[must_use]
pub fn default_stop_grace_period() -> Duration {
	Duration::from_secs(1)
}

/// The consecutive-unintended-exit count at which the supervisor gives up.
pub const RESTART_CAP: u32 = 3;

/// A map used for `${placeholder}` substitution in execution arguments.
pub type PlaceholderMap = HashMap<&'static str, String>;
