pub mod logging;

/// Format an error and all of its sources as a single line,
/// e.g. "could not reach the catalog at '...': error sending request".
pub fn display_chain(mut err: &dyn std::error::Error) -> String {
    let mut fmt = err.to_string();
    while let Some(source) = err.source() {
        fmt = format!("{fmt}: {source}");
        err = source;
    }

    fmt
}

#[cfg(test)]
mod tests {
    use plant_catalog::CatalogClientError;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] CatalogClientError);

    #[test]
    fn display_chain_joins_sources() {
        let err = Outer(CatalogClientError::InvalidRequest("month 13".to_string()));
        assert_eq!(display_chain(&err), "outer: invalid catalog request: month 13");
    }
}
