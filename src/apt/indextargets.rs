//! Parser for `apt-get indextargets` output.
//!
//! The output is a sequence of deb822-style stanzas separated by blank
//! lines. Each stanza describes one acquirable index target; the fields we
//! care about are `Description:`, which matches the file descriptions in
//! the policy listing, and `Trusted:`, the signature verification state of
//! the release the target belongs to.

/// Subset of an indextargets stanza relevant to source-list resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexTarget {
    pub description: String,
    pub trusted: bool,
    pub identifier: Option<String>,
    pub filename: Option<String>,
    pub site: Option<String>,
    pub suite: Option<String>,
    pub codename: Option<String>,
    pub origin: Option<String>,
    pub label: Option<String>,
    pub architecture: Option<String>,
    pub version: Option<String>,
}

/// Parse all stanzas. Stanzas without a `Description:` field are dropped;
/// unknown keys are ignored.
pub fn parse_index_targets(output: &str) -> Vec<IndexTarget> {
    let mut targets = Vec::new();
    let mut current = IndexTarget::default();
    let mut seen_description = false;

    for line in output.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            if seen_description {
                targets.push(std::mem::take(&mut current));
            } else {
                current = IndexTarget::default();
            }
            seen_description = false;
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key {
            "Description" => {
                current.description = value.to_string();
                seen_description = true;
            }
            "Trusted" => current.trusted = value == "yes",
            "Identifier" => current.identifier = Some(value.to_string()),
            "Filename" => current.filename = Some(value.to_string()),
            "Site" => current.site = Some(value.to_string()),
            "Suite" => current.suite = Some(value.to_string()),
            "Codename" => current.codename = Some(value.to_string()),
            "Origin" => current.origin = Some(value.to_string()),
            "Label" => current.label = Some(value.to_string()),
            "Architecture" => current.architecture = Some(value.to_string()),
            "Version" => current.version = Some(value.to_string()),
            _ => {}
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGETS: &str = r#"MetaKey: main/binary-amd64/Packages
ShortDesc: Packages
Description: http://deb.debian.org/debian stable/main amd64 Packages
URI: http://deb.debian.org/debian/dists/stable/main/binary-amd64/Packages.xz
Filename: /var/lib/apt/lists/deb.debian.org_debian_dists_stable_main_binary-amd64_Packages
Identifier: Packages
Site: deb.debian.org
Suite: stable
Codename: trixie
Origin: Debian
Label: Debian
Architecture: amd64
Version: 13.1
Trusted: yes

MetaKey: main/binary-amd64/Packages
ShortDesc: Packages
Description: http://mirror.example.org/unofficial sid/main amd64 Packages
Identifier: Packages
Suite: sid
Trusted: no
"#;

    #[test]
    fn test_parse_index_targets() {
        let targets = parse_index_targets(TARGETS);
        assert_eq!(targets.len(), 2);

        let stable = &targets[0];
        assert_eq!(
            stable.description,
            "http://deb.debian.org/debian stable/main amd64 Packages"
        );
        assert!(stable.trusted);
        assert_eq!(stable.suite.as_deref(), Some("stable"));
        assert_eq!(stable.codename.as_deref(), Some("trixie"));
        assert_eq!(
            stable.filename.as_deref(),
            Some("/var/lib/apt/lists/deb.debian.org_debian_dists_stable_main_binary-amd64_Packages")
        );

        let sid = &targets[1];
        assert!(!sid.trusted);
        assert_eq!(sid.filename, None);
    }

    #[test]
    fn test_stanza_without_description_is_dropped() {
        let targets = parse_index_targets("MetaKey: foo\nTrusted: yes\n\n");
        assert!(targets.is_empty());
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_index_targets("").is_empty());
    }
}
