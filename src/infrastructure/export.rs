use crate::application::SubmissionLedger;
use crate::domain::Schema;
use super::errors::InfrastructureResult;
use std::io::Write;
use std::path::Path;

/// Writes submitted records to CSV.
///
/// Only entries submitted under `schema` are written: a header row of field
/// labels followed by one row per entry with cells in schema order.
pub struct CsvExporter;

impl CsvExporter {
    pub fn write_csv<W: Write>(
        schema: &Schema,
        ledger: &SubmissionLedger,
        writer: W,
    ) -> InfrastructureResult<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(schema.fields.iter().map(|field| field.label.as_str()))?;

        let mut rows = 0;
        for entry in ledger.entries_for(&schema.key) {
            let record: Vec<String> = schema
                .fields
                .iter()
                .map(|field| {
                    entry
                        .values
                        .get(&field.name)
                        .map(|value| value.to_string())
                        .unwrap_or_default()
                })
                .collect();
            csv_writer.write_record(&record)?;
            rows += 1;
        }

        csv_writer.flush()?;
        Ok(rows)
    }

    pub fn export_to_csv(
        schema: &Schema,
        ledger: &SubmissionLedger,
        path: &Path,
    ) -> InfrastructureResult<usize> {
        let file = std::fs::File::create(path)?;
        let rows = Self::write_csv(schema, ledger, file)?;
        log::info!("exported {} {} row(s) to {}", rows, schema.key, path.display());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldValue, FormValues, SchemaRegistry};

    fn ledger_with_users() -> SubmissionLedger {
        let mut ledger = SubmissionLedger::new();

        let mut first = FormValues::new();
        first.insert("firstName".to_string(), FieldValue::from("Ada"));
        first.insert("lastName".to_string(), FieldValue::from("Lovelace"));
        first.insert("age".to_string(), FieldValue::Number(36.0));
        ledger.append("userInfo", first);

        let mut address = FormValues::new();
        address.insert("street".to_string(), FieldValue::from("Main"));
        ledger.append("addressInfo", address);

        let mut second = FormValues::new();
        second.insert("firstName".to_string(), FieldValue::from("Grace"));
        second.insert("lastName".to_string(), FieldValue::from("Hopper, R."));
        ledger.append("userInfo", second);

        ledger
    }

    #[test]
    fn test_write_csv_only_active_form_type() {
        let registry = SchemaRegistry::builtin();
        let schema = registry.lookup("userInfo").unwrap();
        let mut buffer = Vec::new();

        let rows = CsvExporter::write_csv(schema, &ledger_with_users(), &mut buffer).unwrap();

        assert_eq!(rows, 2);
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "First Name,Last Name,Age\nAda,Lovelace,36\nGrace,\"Hopper, R.\",\n"
        );
    }

    #[test]
    fn test_write_csv_empty_ledger_has_header() {
        let registry = SchemaRegistry::builtin();
        let schema = registry.lookup("paymentInfo").unwrap();
        let mut buffer = Vec::new();

        let rows = CsvExporter::write_csv(schema, &ledger_with_users(), &mut buffer).unwrap();

        assert_eq!(rows, 0);
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Card Number,Expiry Date,CVV,Cardholder Name\n"
        );
    }

    #[test]
    fn test_export_to_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.csv");
        let registry = SchemaRegistry::builtin();
        let schema = registry.lookup("userInfo").unwrap();

        let rows = CsvExporter::export_to_csv(schema, &ledger_with_users(), &path).unwrap();

        assert_eq!(rows, 2);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("First Name,Last Name,Age\n"));
    }
}
