use std::{collections::HashMap, fmt::Debug, fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use itertools::Itertools;

use crate::{
    catalog::{CellCatalog, CellRecord, attribute::Attribute},
    prelude::*,
    quantity::{
        electric::{AmpereHours, Amperes, Milliohms, Volts},
        geometry::Liters,
        mass::Grams,
    },
};

/// Reads a cell catalog from a delimited table.
///
/// The table may list attributes as rows and cells as columns (a transposed spreadsheet export),
/// or cells as rows and attributes as columns. The orientation is detected from where the
/// recognised attribute labels are.
#[must_use]
pub struct CatalogLoader {
    delimiter: u8,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self { delimiter: b'\t' }
    }
}

impl CatalogLoader {
    pub const fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    #[instrument(skip(self))]
    pub fn load_path<P: AsRef<Path> + Debug>(&self, path: P) -> Result<CellCatalog> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open the cell catalog `{}`", path.display()))?;
        let catalog = self
            .load(file)
            .with_context(|| format!("failed to load the cell catalog `{}`", path.display()))?;
        info!(n_cells = catalog.len(), "loaded the cell catalog");
        Ok(catalog)
    }

    pub fn load<R: Read>(&self, reader: R) -> Result<CellCatalog> {
        let rows = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader)
            .into_records()
            .collect::<Result<Vec<_>, _>>()
            .context("malformed table")?;
        let Some((header, body)) = rows.split_first() else {
            bail!("the table is empty");
        };

        let attributes_in_header =
            header.iter().skip(1).filter(|label| Attribute::recognise(label).is_some()).count();
        let attributes_in_first_column = body
            .iter()
            .filter_map(|row| row.get(0))
            .filter(|label| Attribute::recognise(label).is_some())
            .count();
        let cells = if attributes_in_first_column > 0
            && attributes_in_first_column >= attributes_in_header
        {
            debug!("attributes are rows, cells are columns");
            Self::read_cells_as_columns(header, body)
        } else if attributes_in_header > 0 {
            debug!("cells are rows, attributes are columns");
            Self::read_cells_as_rows(header, body)
        } else {
            bail!("no recognised cell attributes in the table");
        };

        let records = cells
            .into_iter()
            .map(|(name, values)| into_record(name, &values))
            .collect::<Result<Vec<_>>>()?;
        CellCatalog::try_from_records(records)
    }

    fn read_cells_as_columns(
        header: &StringRecord,
        body: &[StringRecord],
    ) -> Vec<(String, HashMap<Attribute, String>)> {
        let mut cells: Vec<_> = header
            .iter()
            .skip(1)
            .map(|name| (name.to_owned(), HashMap::<Attribute, String>::new()))
            .collect();
        for row in body {
            let label = row.get(0).unwrap_or_default();
            let Some(attribute) = Attribute::recognise(label) else {
                debug!(label, "skipping an unknown attribute");
                continue;
            };
            for ((_, values), value) in cells.iter_mut().zip(row.iter().skip(1)) {
                values.insert(attribute, value.to_owned());
            }
        }
        cells.retain(|(name, _)| !name.is_empty());
        cells
    }

    fn read_cells_as_rows(
        header: &StringRecord,
        body: &[StringRecord],
    ) -> Vec<(String, HashMap<Attribute, String>)> {
        let attributes: Vec<_> = header
            .iter()
            .skip(1)
            .map(|label| {
                let attribute = Attribute::recognise(label);
                if attribute.is_none() {
                    debug!(label, "skipping an unknown attribute");
                }
                attribute
            })
            .collect();
        body.iter()
            .filter_map(|row| {
                let name = row.get(0).filter(|name| !name.is_empty())?;
                let values = attributes
                    .iter()
                    .zip(row.iter().skip(1))
                    .filter_map(|(attribute, value)| Some(((*attribute)?, value.to_owned())))
                    .collect();
                Some((name.to_owned(), values))
            })
            .collect()
    }
}

fn into_record(name: String, values: &HashMap<Attribute, String>) -> Result<CellRecord> {
    let missing = Attribute::REQUIRED
        .iter()
        .filter(|attribute| values.get(*attribute).is_none_or(String::is_empty))
        .map(|attribute| format!("`{}`", attribute.label()))
        .join(", ");
    ensure!(missing.is_empty(), "`{name}`: missing {missing}");

    let number = |attribute: Attribute| -> Result<f64> {
        let value = values
            .get(&attribute)
            .filter(|value| !value.is_empty())
            .with_context(|| format!("`{name}`: missing `{}`", attribute.label()))?;
        value
            .parse()
            .with_context(|| format!("`{name}`: `{}` is not a number: `{value}`", attribute.label()))
    };
    CellRecord::builder()
        .nominal_voltage(Volts(number(Attribute::NominalVoltage)?))
        .max_voltage(Volts(number(Attribute::MaxVoltage)?))
        .nominal_capacity(AmpereHours(number(Attribute::NominalCapacity)?))
        .continuous_current(Amperes(number(Attribute::ContinuousCurrent)?))
        .mass(Grams(number(Attribute::Mass)?))
        .volume(Liters(number(Attribute::Volume)?))
        .dcir(Milliohms(number(Attribute::Dcir)?))
        .maybe_manufacturer(
            values.get(&Attribute::Manufacturer).filter(|value| !value.is_empty()).cloned(),
        )
        .name(name)
        .build()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const ATTRIBUTES_AS_ROWS: &str = "\
\tP45B\tP42A
Manufacturer\tMolicel\tMolicel
Nominal Voltage (V)\t3.6\t3.6
Max Voltage (V)\t4.2\t4.2
Nominal Capacity (Ah)\t4.5\t4.2
Continuous Discharge Current (A)\t45\t45
Mass (g)\t70\t70
Volume (L)\t0.0243\t0.0243
Typical DCIR (mOhm)\t9\t13
Price (EUR)\t5.5\t4.5
";

    const CELLS_AS_ROWS: &str = "\
Cell,Nominal Voltage (V),Max Voltage (V),Nominal Capacity (Ah),Continuous Discharge Current (A),Mass (g),Volume (L),Typical DCIR (mOhm)
P45B,3.6,4.2,4.5,45,70,0.0243,9
P42A,3.6,4.2,4.2,45,70,0.0243,13
";

    #[test]
    fn test_attributes_as_rows() -> Result {
        let catalog = CatalogLoader::default().load(ATTRIBUTES_AS_ROWS.as_bytes())?;
        assert_eq!(catalog.len(), 2);
        let cell = catalog.get("P42A")?;
        assert_eq!(cell.manufacturer.as_deref(), Some("Molicel"));
        assert_abs_diff_eq!(cell.nominal_capacity.0, 4.2);
        assert_abs_diff_eq!(cell.dcir.0, 13.0);
        Ok(())
    }

    #[test]
    fn test_cells_as_rows() -> Result {
        let catalog = CatalogLoader::with_delimiter(b',').load(CELLS_AS_ROWS.as_bytes())?;
        let transposed = CatalogLoader::default().load(ATTRIBUTES_AS_ROWS.as_bytes())?;
        for (lhs, rhs) in catalog.iter().zip(transposed.iter()) {
            assert_eq!(lhs.name, rhs.name);
            assert_eq!(lhs.nominal_voltage, rhs.nominal_voltage);
            assert_eq!(lhs.nominal_capacity, rhs.nominal_capacity);
            assert_eq!(lhs.dcir, rhs.dcir);
        }
        assert_eq!(catalog.get("P45B")?.manufacturer, None);
        Ok(())
    }

    #[test]
    fn test_missing_attribute() {
        let table = "\tP45B\nNominal Voltage (V)\t3.6\nMax Voltage (V)\t4.2\n";
        let error = CatalogLoader::default().load(table.as_bytes()).unwrap_err();
        assert!(format!("{error:#}").contains("Nominal Capacity (Ah)"));
    }

    #[test]
    fn test_not_a_number() {
        let table = ATTRIBUTES_AS_ROWS.replace("3.6\t3.6", "3.6\tthree");
        let error = CatalogLoader::default().load(table.as_bytes()).unwrap_err();
        assert!(format!("{error:#}").contains("P42A"));
    }

    #[test]
    fn test_duplicate_cell() {
        let table = CELLS_AS_ROWS.replace("P42A", "P45B");
        assert!(CatalogLoader::with_delimiter(b',').load(table.as_bytes()).is_err());
    }

    #[test]
    fn test_no_attributes() {
        assert!(CatalogLoader::default().load("a\tb\nc\td\n".as_bytes()).is_err());
        assert!(CatalogLoader::default().load("".as_bytes()).is_err());
    }
}
