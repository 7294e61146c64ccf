use std::path::Path;

/// `{binary}-{version}` followed by the platform, compiler and commit it was built from.
pub fn version() -> String {
    let binary = std::env::args()
        .next()
        .and_then(|arg0| Path::new(&arg0).file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    format!(
        "{binary}-{}\n{}/{}, {}, {}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
        env!("HAPROXY_STATUS_RUSTC"),
        env!("HAPROXY_STATUS_COMMIT"),
    )
}

#[cfg(test)]
mod test {
    #[test]
    fn two_lines() {
        let version = super::version();
        let lines: Vec<_> = version.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(&format!("-{}", env!("CARGO_PKG_VERSION"))));
        assert!(lines[1].starts_with(&format!("{}/{}, ", std::env::consts::OS, std::env::consts::ARCH)));
    }
}
