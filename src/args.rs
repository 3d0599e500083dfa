//! Token split for verb arguments: dash-prefixed tokens are flags, the rest
//! are named arguments (formula or keg names, URLs, paths).

#[derive(Debug, Clone, Default)]
pub struct Args {
    pub named: Vec<String>,
    pub flags: Vec<String>,
}

impl Args {
    /// Partition the tokens that followed the verb.
    pub fn split(tokens: &[String]) -> Self {
        let (flags, named) = tokens
            .iter()
            .cloned()
            .partition(|token| token.starts_with('-'));
        Self { named, flags }
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.iter().any(|flag| flag == name)
    }

    pub fn first(&self) -> Option<&str> {
        self.named.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partitions_by_leading_dash() {
        let args = Args::split(&tokens(&["wget", "--quiet", "curl", "-v"]));
        assert_eq!(args.named, vec!["wget", "curl"]);
        assert_eq!(args.flags, vec!["--quiet", "-v"]);
    }

    #[test]
    fn test_order_of_named_arguments_survives() {
        let args = Args::split(&tokens(&["zlib", "openssl", "pcre2"]));
        assert_eq!(args.named, vec!["zlib", "openssl", "pcre2"]);
        assert!(args.flags.is_empty());
    }

    #[test]
    fn test_flag_lookup() {
        let args = Args::split(&tokens(&["--unbrewed"]));
        assert!(args.flag("--unbrewed"));
        assert!(!args.flag("--quiet"));
        assert!(args.is_empty());
    }
}
