//! Argument-token substitution and argv construction for a manifest's
//! `execution` template (§4.E "Launch").

use std::collections::HashMap;
use std::path::Path;

use host_core_ports::ExecutionTemplate;
use tokio::process::Command;

use crate::config::RuntimePaths;

/// The resolved value for every `${...}` token the launch step may need;
/// `image_id`/`image_url` are only present for image-event fan-out.
#[derive(Debug, Clone, Default)]
pub struct LaunchVariables {
	pub extension_id: String,
	pub api_key: String,
	pub web_services_base_url: String,
	pub extension_directory_path: String,
	pub image_id: Option<String>,
	pub image_url: Option<String>,
}

impl LaunchVariables {
	fn as_map(&self, runtime_paths: &RuntimePaths) -> HashMap<&'static str, String> {
		let mut map = HashMap::from([
			("extensionId", self.extension_id.clone()),
			("apiKey", self.api_key.clone()),
			("webServicesBaseUrl", self.web_services_base_url.clone()),
			("extensionDirectoryPath", self.extension_directory_path.clone()),
			("node", runtime_paths.node.display().to_string()),
			("venvPython", runtime_paths.venv_python.display().to_string()),
			("shell", runtime_paths.shell.display().to_string()),
		]);
		if let Some(image_id) = &self.image_id {
			map.insert("imageId", image_id.clone());
		}
		if let Some(image_url) = &self.image_url {
			map.insert("imageUrl", image_url.clone());
		}
		map
	}
}

fn substitute(raw: &str, vars: &HashMap<&'static str, String>) -> String {
	let mut resolved = raw.to_string();
	for (token, value) in vars {
		resolved = resolved.replace(&format!("${{{token}}}"), value);
	}
	resolved
}

/// Builds the `tokio::process::Command` a launch template resolves to.
///
/// `${node}`/`${shell}` as the `executable` field choose a dedicated
/// invocation style; anything else (including `${venvPython}`, or a
/// literal path) is substituted and spawned directly with the resolved
/// argv (§4.E).
#[must_use]
pub fn build_command(
	execution: &ExecutionTemplate,
	vars: &LaunchVariables,
	runtime_paths: &RuntimePaths,
	working_directory: &Path,
) -> Command {
	let var_map = vars.as_map(runtime_paths);
	let args: Vec<String> = execution.arguments.iter().map(|arg| substitute(arg, &var_map)).collect();

	let mut command = match execution.executable.as_str() {
		"${node}" => Command::new(&runtime_paths.node),
		"${shell}" => {
			let mut command = Command::new(&runtime_paths.shell);
			command.arg("-c").arg(args.join(" "));
			command.current_dir(working_directory);
			return command;
		}
		other => Command::new(substitute(other, &var_map)),
	};
	command.args(args);
	command.current_dir(working_directory);
	command
}

#[cfg(test)]
mod tests {
	use super::*;

	fn vars() -> LaunchVariables {
		LaunchVariables {
			extension_id: "photo-tagger".to_string(),
			api_key: "a".repeat(36),
			web_services_base_url: "http://localhost:8080".to_string(),
			extension_directory_path: "/var/extensions/photo-tagger".to_string(),
			image_id: None,
			image_url: None,
		}
	}

	#[test]
	fn node_executable_forks_the_node_runtime_directly() {
		let execution = ExecutionTemplate {
			executable: "${node}".to_string(),
			arguments: vec!["index.js".to_string(), "--key=${apiKey}".to_string()],
		};
		let command = build_command(&execution, &vars(), &RuntimePaths::default(), Path::new("/tmp"));
		let std_command = command.as_std();
		assert_eq!(std_command.get_program(), RuntimePaths::default().node.as_os_str());
		let args: Vec<_> = std_command.get_args().collect();
		assert_eq!(args[0], "index.js");
		assert!(args[1].to_string_lossy().contains(&vars().api_key));
	}

	#[test]
	fn shell_executable_joins_arguments_into_one_command_string() {
		let execution = ExecutionTemplate {
			executable: "${shell}".to_string(),
			arguments: vec!["echo".to_string(), "${extensionId}".to_string()],
		};
		let command = build_command(&execution, &vars(), &RuntimePaths::default(), Path::new("/tmp"));
		let std_command = command.as_std();
		let args: Vec<_> = std_command.get_args().collect();
		assert_eq!(args[0], "-c");
		assert_eq!(args[1], "echo photo-tagger");
	}

	#[test]
	fn literal_executable_is_substituted_and_spawned_directly() {
		let execution = ExecutionTemplate {
			executable: "${extensionDirectoryPath}/run.sh".to_string(),
			arguments: vec![],
		};
		let command = build_command(&execution, &vars(), &RuntimePaths::default(), Path::new("/tmp"));
		assert_eq!(command.as_std().get_program(), "/var/extensions/photo-tagger/run.sh");
	}

	#[test]
	fn venv_python_placeholder_resolves_to_the_configured_interpreter() {
		let execution = ExecutionTemplate {
			executable: "${venvPython}".to_string(),
			arguments: vec!["worker.py".to_string()],
		};
		let runtime_paths = RuntimePaths::default();
		let command = build_command(&execution, &vars(), &runtime_paths, Path::new("/tmp"));
		assert_eq!(command.as_std().get_program(), runtime_paths.venv_python.as_os_str());
	}
}
