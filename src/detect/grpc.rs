//! Protocol Buffers service file metadata extraction.
//!
//! Scrapes `service` names and the `package` declaration with regexes,
//! and takes the leading `//` comment block as the description.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use super::types::GrpcApiInfo;

fn service_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*service\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{").unwrap()
    })
}

fn package_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*package\s+([A-Za-z_][A-Za-z0-9_.]*)\s*;").unwrap()
    })
}

/// Whether the file declares at least one `service` block.
pub fn has_service(content: &str) -> bool {
    service_re().is_match(content)
}

/// Scrape gRPC metadata from a classified `.proto` file.
pub fn extract(file_path: &Path, content: &str) -> GrpcApiInfo {
    let services = service_re()
        .captures_iter(content)
        .map(|cap| cap[1].to_string())
        .collect();

    let package = package_re()
        .captures(content)
        .map(|cap| cap[1].to_string());

    GrpcApiInfo {
        file_path: file_path.to_path_buf(),
        services,
        package,
        description: leading_comment(content),
    }
}

/// The leading run of `//` comment lines, joined and trimmed.
fn leading_comment(content: &str) -> Option<String> {
    let mut lines = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() && lines.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("//") {
            lines.push(rest.trim());
        } else {
            break;
        }
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const USERS_PROTO: &str = r#"
// User account RPCs.
syntax = "proto3";

package portal.users.v1;

service Users {
  rpc GetUser(GetUserRequest) returns (User);
}

service Sessions {
  rpc Login(LoginRequest) returns (Session);
}

message User {
  string id = 1;
}
"#;

    #[test]
    fn test_extract_services_and_package() {
        let api = extract(&PathBuf::from("users.proto"), USERS_PROTO);
        assert_eq!(api.services, vec!["Users", "Sessions"]);
        assert_eq!(api.package.as_deref(), Some("portal.users.v1"));
        assert_eq!(api.description.as_deref(), Some("User account RPCs."));
    }

    #[test]
    fn test_messages_only_has_no_service() {
        let content = "syntax = \"proto3\";\nmessage Empty {}\n";
        assert!(!has_service(content));
    }

    #[test]
    fn test_service_in_comment_does_not_match() {
        let content = "// service Fake {\nsyntax = \"proto3\";\nmessage A {}\n";
        assert!(!has_service(content));
    }

    #[test]
    fn test_indented_service_matches() {
        let content = "  service Indented {\n  }\n";
        let api = extract(&PathBuf::from("a.proto"), content);
        assert_eq!(api.services, vec!["Indented"]);
        assert!(api.package.is_none());
    }

    #[test]
    fn test_no_leading_comment() {
        let content = "syntax = \"proto3\";\n// inner comment\nservice S {}\n";
        let api = extract(&PathBuf::from("s.proto"), content);
        assert!(api.description.is_none());
    }
}
