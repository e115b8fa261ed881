use anyhow::Result;

use crate::graph::sentence::SentenceEntityAggregator;
use crate::graph::triple::Triple;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Ok(OutputFormat::Text), // Default to text format
        }
    }
}

const CSV_HEADER: [&str; 7] = [
    "subject",
    "subject_class",
    "predicate",
    "object",
    "object_class",
    "sentence",
    "source_url",
];

/// Render extracted triples in the requested format
pub struct TripleFormatter {
    format: OutputFormat,
}

impl TripleFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, triples: &[Triple]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_json(triples),
            OutputFormat::Text => self.format_text(triples),
            OutputFormat::Csv => self.format_csv(triples),
        }
    }

    /// Summaries of each aggregator, one block per sentence
    ///
    /// Entity types keep first-seen order in every format.
    pub fn format_summaries(&self, aggregators: &[SentenceEntityAggregator]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = aggregators
                    .iter()
                    .map(|agg| {
                        serde_json::json!({
                            "sentence": agg.sentence(),
                            "entity_count": agg.entity_count(),
                            "trivial": agg.is_empty(),
                            "entities": agg
                                .entities_by_type()
                                .iter()
                                .map(|(ty, names)| serde_json::json!({
                                    "type": ty,
                                    "names": names,
                                }))
                                .collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Csv => Err(anyhow::anyhow!(
                "CSV format not supported for sentence summaries"
            )),
            OutputFormat::Text => {
                if aggregators.is_empty() {
                    return Ok("No sentences found".to_string());
                }
                let blocks: Vec<String> =
                    aggregators.iter().map(|agg| agg.render_summary()).collect();
                Ok(blocks.join("\n\n"))
            }
        }
    }

    fn format_json(&self, triples: &[Triple]) -> Result<String> {
        Ok(serde_json::to_string_pretty(triples)?)
    }

    fn format_text(&self, triples: &[Triple]) -> Result<String> {
        if triples.is_empty() {
            return Ok("No triples found".to_string());
        }

        let mut result = String::new();
        for triple in triples {
            result.push_str(&triple.to_string());
            result.push('\n');
        }

        Ok(result)
    }

    fn format_csv(&self, triples: &[Triple]) -> Result<String> {
        let mut result = CSV_HEADER.join(",");
        result.push('\n');

        for triple in triples {
            let row = [
                self.escape_csv_value(&triple.subject),
                triple.subject_class.map_or(String::new(), |c| c.to_string()),
                triple.predicate.map_or(String::new(), |p| p.to_string()),
                self.escape_csv_value(&triple.object),
                triple.object_class.map_or(String::new(), |c| c.to_string()),
                self.escape_csv_value(&triple.sentence),
                self.escape_csv_value(&triple.source_url),
            ];
            result.push_str(&row.join(","));
            result.push('\n');
        }

        Ok(result)
    }

    /// Escape a CSV value
    fn escape_csv_value(&self, value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            let escaped = value.replace('"', "\"\"");
            format!("\"{}\"", escaped)
        } else {
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_triples() -> Vec<Triple> {
        let mut agg = SentenceEntityAggregator::new("Alice, \"the CEO\", runs Acme.");
        agg.add_entity("Alice", "PERSON");
        agg.add_entity("Acme", "ORGANIZATION");
        agg.get_all_triples("http://example.com")
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("whatever".parse::<OutputFormat>(), Ok(OutputFormat::Text));
    }

    #[test]
    fn test_format_text() {
        let formatter = TripleFormatter::new(OutputFormat::Text);
        let output = formatter.format(&sample_triples()).unwrap();
        assert_eq!(
            output,
            "Alice (Person) -hasOrganization-> Acme (Organization)\n\
             Acme (Organization) -hasPerson-> Alice (Person)\n"
        );
        assert_eq!(formatter.format(&[]).unwrap(), "No triples found");
    }

    #[test]
    fn test_format_json() {
        let formatter = TripleFormatter::new(OutputFormat::Json);
        let output = formatter.format(&sample_triples()).unwrap();
        let parsed: Vec<Triple> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, sample_triples());
    }

    #[test]
    fn test_format_csv_escapes_values() {
        let formatter = TripleFormatter::new(OutputFormat::Csv);
        let output = formatter.format(&sample_triples()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "subject,subject_class,predicate,object,object_class,sentence,source_url"
        );
        assert_eq!(
            lines[1],
            "Alice,Person,hasOrganization,Acme,Organization,\"Alice, \"\"the CEO\"\", runs Acme.\",http://example.com"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_format_csv_leaves_unmapped_cells_empty() {
        let mut agg = SentenceEntityAggregator::new("Acme at noon");
        agg.add_entity("Acme", "ORGANIZATION");
        agg.add_entity("noon", "TIME");

        let formatter = TripleFormatter::new(OutputFormat::Csv);
        let output = formatter.format(&agg.get_all_triples("u")).unwrap();
        assert_eq!(
            output.lines().nth(1).unwrap(),
            "Acme,Organization,,noon,,Acme at noon,u"
        );
    }

    #[test]
    fn test_format_summaries() {
        let mut agg = SentenceEntityAggregator::new("Alice in Paris.");
        agg.add_entity("Alice", "PERSON");
        agg.add_entity("Paris", "LOCATION");

        let text = TripleFormatter::new(OutputFormat::Text)
            .format_summaries(&[agg.clone()])
            .unwrap();
        assert_eq!(text, agg.render_summary());

        let json = TripleFormatter::new(OutputFormat::Json)
            .format_summaries(&[agg])
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["entity_count"], 2);
        assert_eq!(value[0]["trivial"], false);
        assert_eq!(value[0]["entities"][0]["type"], "PERSON");
        assert_eq!(value[0]["entities"][0]["names"][0], "Alice");
        assert_eq!(value[0]["entities"][1]["type"], "LOCATION");
    }

    #[test]
    fn test_json_summary_matches_text_type_order() {
        let mut agg = SentenceEntityAggregator::new("Acme paid $5 in Paris.");
        agg.add_entity("Paris", "LOCATION");
        agg.add_entity("$5", "MONEY");
        agg.add_entity("Acme", "ORGANIZATION");

        let json = TripleFormatter::new(OutputFormat::Json)
            .format_summaries(&[agg.clone()])
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let types: Vec<&str> = value[0]["entities"]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["type"].as_str().unwrap())
            .collect();

        let text_types: Vec<String> = agg.entities_by_type().types().map(|ty| ty.to_string()).collect();
        assert_eq!(types, vec!["LOCATION", "MONEY", "ORGANIZATION"]);
        assert_eq!(types, text_types);
    }

    #[test]
    fn test_csv_summaries_are_rejected() {
        let formatter = TripleFormatter::new(OutputFormat::Csv);
        assert!(formatter.format_summaries(&[]).is_err());
    }
}
