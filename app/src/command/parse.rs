use serde_json::json;
use stringlens_query::QueryParser;

/// Input for the parse command.
#[derive(Debug, Clone)]
pub struct ParseInput {
    pub query: String,
}

/// Strategy for printing how a natural-language query is interpreted.
///
/// Prints the filters, any conflicts and the rules that fired as JSON. Fails
/// when the query yields no filters, mirroring the HTTP endpoint.
#[derive(Debug, Clone, Copy)]
pub struct ParseStrategy;

impl super::CommandStrategy for ParseStrategy {
    type Input = ParseInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let parser = QueryParser::with_defaults()?;
        let parsed = parser
            .parse(&input.query)
            .map_err(|e| anyhow::anyhow!("Unable to parse {:?}: {e}", input.query))?;

        let output = json!({
            "original": input.query,
            "parsed_filters": parsed.filters,
            "conflicts": parsed.conflicts,
            "rules": parsed.rules,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);

        if parsed.has_conflicts() {
            anyhow::bail!("Query parsed but resulted in conflicting filters");
        }
        Ok(())
    }
}
