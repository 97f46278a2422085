use log::{debug, info};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use wasm_bindgen::prelude::*;

pub mod cache;
pub mod car_list;
pub mod config;
pub mod confirm;
pub mod projection;
pub mod tool;
pub mod utils;

pub use cache::{CacheKey, ProjectionCache};
pub use car_list::CarList;
pub use confirm::DeleteConfirmation;
pub use projection::project;
pub use tool::CarToolState;

/// A single row of the car table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Car {
    pub id: u32,
    pub make: String,
    pub model: String,
    pub year: u32,
    pub color: String,
    pub price: u32,
}

impl Car {
    /// Look up the value of one column.
    pub fn field(&self, field: CarField) -> FieldValue<'_> {
        match field {
            CarField::Id => FieldValue::Number(self.id),
            CarField::Make => FieldValue::Text(&self.make),
            CarField::Model => FieldValue::Text(&self.model),
            CarField::Year => FieldValue::Number(self.year),
            CarField::Color => FieldValue::Text(&self.color),
            CarField::Price => FieldValue::Number(self.price),
        }
    }

    /// "make model year", used to describe a car in the delete prompt.
    pub fn summary(&self) -> String {
        format!("{} {} {}", self.make, self.model, self.year)
    }
}

/// A car as entered in the add form, before the list assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub year: u32,
    pub color: String,
    pub price: u32,
}

impl NewCar {
    pub fn with_id(self, id: u32) -> Car {
        Car {
            id,
            make: self.make,
            model: self.model,
            year: self.year,
            color: self.color,
            price: self.price,
        }
    }
}

/// The closed set of columns a car can be filtered or sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CarField {
    #[default]
    Id,
    Make,
    Model,
    Year,
    Color,
    Price,
}

impl CarField {
    pub const ALL: [CarField; 6] = [
        CarField::Id,
        CarField::Make,
        CarField::Model,
        CarField::Year,
        CarField::Color,
        CarField::Price,
    ];

    /// Machine name, as used in form values and the JS export.
    pub fn name(self) -> &'static str {
        match self {
            CarField::Id => "id",
            CarField::Make => "make",
            CarField::Model => "model",
            CarField::Year => "year",
            CarField::Color => "color",
            CarField::Price => "price",
        }
    }

    /// Column header text.
    pub fn label(self) -> &'static str {
        match self {
            CarField::Id => "Id",
            CarField::Make => "Make",
            CarField::Model => "Model",
            CarField::Year => "Year",
            CarField::Color => "Color",
            CarField::Price => "Price",
        }
    }
}

impl FromStr for CarField {
    type Err = CarToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        CarField::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CarToolError::FieldNotFound(name.to_string()))
    }
}

impl fmt::Display for CarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed value of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Number(u32),
    Text(&'a str),
}

// A given column always yields the same variant, so mixed comparisons only
// matter for completeness: numbers order before text.
impl Ord for FieldValue<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
            (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for FieldValue<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow shown next to the sorted column header.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

impl FromStr for SortDirection {
    type Err = CarToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            other => Err(CarToolError::InvalidDirection(other.to_string())),
        }
    }
}

/// Which cars to show: those whose `field`, as text, contains `value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterSpec {
    pub field: CarField,
    pub value: String,
}

impl FilterSpec {
    pub fn new(field: CarField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// Build a filter from a field name coming from a form or from JS.
    pub fn parse(field: &str, value: impl Into<String>) -> Result<Self, CarToolError> {
        Ok(Self::new(field.parse()?, value))
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::new(CarField::Id, "")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SortSpec {
    pub field: CarField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: CarField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn parse(field: &str, direction: &str) -> Result<Self, CarToolError> {
        Ok(Self::new(field.parse()?, direction.parse()?))
    }

    /// Result of clicking a column header: the active column flips
    /// direction, any other column starts ascending.
    pub fn toggled(self, field: CarField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.flipped())
        } else {
            Self::new(field, SortDirection::Ascending)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarToolError {
    FieldNotFound(String),
    RecordNotFound(u32),
    InvalidDirection(String),
    Csv(String),
    IdsExhausted,
}

impl fmt::Display for CarToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarToolError::FieldNotFound(name) => write!(f, "Unknown car field '{}'", name),
            CarToolError::RecordNotFound(id) => write!(f, "No car with id {}", id),
            CarToolError::InvalidDirection(dir) => write!(
                f,
                "Invalid sort direction '{}', expected 'asc' or 'desc'",
                dir
            ),
            CarToolError::Csv(msg) => write!(f, "Failed to read car data: {}", msg),
            CarToolError::IdsExhausted => write!(f, "No car ids left to assign"),
        }
    }
}

impl std::error::Error for CarToolError {}

/// Parse the seed car table. Expects a header row
/// `id,make,model,year,color,price`; malformed rows and duplicate ids are
/// skipped.
pub fn read_cars_from_csv_string(csv_content: &str) -> Result<Vec<Car>, CarToolError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_content.as_bytes());

    reader
        .headers()
        .map_err(|e| CarToolError::Csv(e.to_string()))?;

    let mut cars = Vec::new();
    let mut seen_ids = HashSet::new();

    for (i, row) in reader.deserialize::<Car>().enumerate() {
        // Line numbers are 1-based and the header takes the first line
        let line = i + 2;
        let car = match row {
            Ok(car) => car,
            Err(e) => {
                debug!("Warning: {} on line {}", e, line);
                continue;
            }
        };

        if !seen_ids.insert(car.id) {
            debug!(
                "Warning: Duplicate ID '{}' found on line {}, skipping",
                car.id, line
            );
            continue;
        }

        cars.push(car);
    }

    info!("Successfully loaded {} cars from CSV content", cars.len());
    Ok(cars)
}

/// Filter and sort a car array handed over from JavaScript.
///
/// # Arguments
/// * `cars_js` - Serialized car array
/// * `filter_field` / `filter_value` - Substring filter on one column
/// * `sort_field` / `direction` - Column to sort by and `"asc"` or `"desc"`
///
/// # Returns
/// The serialized projection, or an error message string
#[wasm_bindgen]
pub fn project_cars(
    cars_js: JsValue,
    filter_field: &str,
    filter_value: &str,
    sort_field: &str,
    direction: &str,
) -> JsValue {
    let cars: Vec<Car> = match serde_wasm_bindgen::from_value(cars_js) {
        Ok(c) => c,
        Err(e) => {
            return serde_wasm_bindgen::to_value(&format!("Failed to deserialize cars: {}", e))
                .unwrap_or(JsValue::NULL);
        }
    };

    match project_named(&cars, filter_field, filter_value, sort_field, direction) {
        Ok(projected) => serde_wasm_bindgen::to_value(&projected).unwrap_or(JsValue::NULL),
        Err(e) => serde_wasm_bindgen::to_value(&e.to_string()).unwrap_or(JsValue::NULL),
    }
}

/// Parse column names and direction from text, then filter and sort `cars`
/// with a fresh cache.
pub fn project_named(
    cars: &[Car],
    filter_field: &str,
    filter_value: &str,
    sort_field: &str,
    direction: &str,
) -> Result<Vec<Car>, CarToolError> {
    let filter = FilterSpec::parse(filter_field, filter_value)?;
    let sort = SortSpec::parse(sort_field, direction)?;

    let mut cache = ProjectionCache::new();
    Ok(project(&mut cache, cars, &filter, &sort).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_parse_case_insensitively() {
        assert_eq!("make".parse::<CarField>(), Ok(CarField::Make));
        assert_eq!(" Year ".parse::<CarField>(), Ok(CarField::Year));
        assert_eq!(
            "mileage".parse::<CarField>(),
            Err(CarToolError::FieldNotFound("mileage".to_string()))
        );
    }

    #[test]
    fn spec_parsing_reports_bad_names() {
        assert_eq!(
            SortSpec::parse("price", "desc"),
            Ok(SortSpec::new(CarField::Price, SortDirection::Descending))
        );
        assert_eq!(
            SortSpec::parse("price", "down"),
            Err(CarToolError::InvalidDirection("down".to_string()))
        );
        assert!(matches!(
            FilterSpec::parse("vin", "x"),
            Err(CarToolError::FieldNotFound(_))
        ));
    }

    #[test]
    fn toggling_sort_column() {
        let sort = SortSpec::default();
        let flipped = sort.toggled(CarField::Id);
        assert_eq!(flipped.direction, SortDirection::Descending);

        let other = flipped.toggled(CarField::Make);
        assert_eq!(other, SortSpec::new(CarField::Make, SortDirection::Ascending));
    }

    #[test]
    fn field_values_render_as_text() {
        let car = NewCar {
            make: "Ford".into(),
            model: "Fusion Hybrid".into(),
            year: 2019,
            color: "blue".into(),
            price: 45000,
        }
        .with_id(7);

        assert_eq!(car.field(CarField::Id).to_string(), "7");
        assert_eq!(car.field(CarField::Model).to_string(), "Fusion Hybrid");
        assert_eq!(car.summary(), "Ford Fusion Hybrid 2019");
        assert!(FieldValue::Number(10) > FieldValue::Number(9));
        assert!(FieldValue::Text("Kia") > FieldValue::Text("Ford"));
    }

    #[test]
    fn csv_loader_skips_bad_rows_and_duplicates() {
        let csv = "id,make,model,year,color,price\n\
                   1,Ford,Fusion,2019,blue,45000\n\
                   2,Tesla,S,not-a-year,red,120000\n\
                   1,Ford,Focus,2011,white,12000\n\
                   3, Kia , Soul ,2020,green,21000\n";
        let cars = read_cars_from_csv_string(csv).unwrap();

        assert_eq!(cars.len(), 2);
        assert_eq!(cars[0].model, "Fusion");
        assert_eq!(cars[1].make, "Kia");
        assert_eq!(cars[1].model, "Soul");
    }

    fn seed() -> Vec<Car> {
        read_cars_from_csv_string(config::SEED_CSV).unwrap()
    }

    #[test]
    fn bundled_seed_data_loads() {
        let cars = seed();
        assert_eq!(cars.len(), 6);
        assert_eq!(cars[0].summary(), "Ford Fusion Hybrid 2019");
    }

    #[test]
    fn named_projection_filters_and_sorts() {
        let out = project_named(&seed(), "make", "Ford", "year", "desc").unwrap();
        let ids: Vec<u32> = out.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn named_projection_rejects_unknown_names() {
        let cars = seed();
        assert_eq!(
            project_named(&cars, "vin", "", "id", "asc"),
            Err(CarToolError::FieldNotFound("vin".to_string()))
        );
        assert_eq!(
            project_named(&cars, "make", "", "mileage", "asc"),
            Err(CarToolError::FieldNotFound("mileage".to_string()))
        );
        assert_eq!(
            project_named(&cars, "make", "", "id", "up"),
            Err(CarToolError::InvalidDirection("up".to_string()))
        );
    }
}
