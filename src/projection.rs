//! Filter and sort the car table, memoized through a [`ProjectionCache`].

use crate::cache::{CacheKey, CacheValue, ProjectionCache};
use crate::{Car, CarField, FilterSpec, SortDirection, SortSpec};
use log::debug;
use std::cmp::Ordering;
use std::rc::Rc;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// True when the textual form of `car[filter.field]` contains `filter.value`.
/// Case sensitive; an empty value matches every car.
pub fn matches_filter(car: &Car, filter: &FilterSpec) -> bool {
    car.field(filter.field)
        .to_string()
        .contains(filter.value.as_str())
}

/// Compare two cars on one column. Equal values stay equal in both
/// directions so a stable sort keeps their input order.
pub fn compare_by_field(a: &Car, b: &Car, field: CarField, direction: SortDirection) -> Ordering {
    let ordering = a.field(field).cmp(&b.field(field));
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Return the cars to display for the given settings.
///
/// A repeat call with the same settings returns the cached `Rc` without
/// recomputing. The caller is responsible for invalidating `cache` whenever
/// `cars` changes.
pub fn project(
    cache: &mut ProjectionCache,
    cars: &[Car],
    filter: &FilterSpec,
    sort: &SortSpec,
) -> CacheValue {
    let key = CacheKey::new(filter, sort);
    if let Some(hit) = cache.get(&key) {
        return hit;
    }

    #[cfg(not(target_arch = "wasm32"))]
    let start_time = Instant::now();
    #[cfg(target_arch = "wasm32")]
    let start_time = js_sys::Date::now();

    let mut projected: Vec<Car> = cars
        .iter()
        .filter(|car| matches_filter(car, filter))
        .cloned()
        .collect();
    // sort_by is stable
    projected.sort_by(|a, b| compare_by_field(a, b, sort.field, sort.direction));

    #[cfg(not(target_arch = "wasm32"))]
    let elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0;
    #[cfg(target_arch = "wasm32")]
    let elapsed_ms = js_sys::Date::now() - start_time;

    debug!(
        "performing filter and sort: {} contains '{}', by {} {} -> {}/{} cars in {:.3} ms",
        filter.field,
        filter.value,
        sort.field,
        sort.direction.as_str(),
        projected.len(),
        cars.len(),
        elapsed_ms
    );

    let value: CacheValue = Rc::from(projected);
    cache.insert(key, value.clone());
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewCar;

    fn car(id: u32, make: &str, model: &str, year: u32) -> Car {
        NewCar {
            make: make.to_string(),
            model: model.to_string(),
            year,
            color: "red".to_string(),
            price: 10_000 + id,
        }
        .with_id(id)
    }

    fn sample() -> Vec<Car> {
        vec![
            car(1, "Ford", "Fusion", 2001),
            car(2, "Ford", "Focus", 1999),
            car(3, "Kia", "Soul", 2001),
        ]
    }

    fn ids(cars: &[Car]) -> Vec<u32> {
        cars.iter().map(|c| c.id).collect()
    }

    #[test]
    fn ford_by_year_ascending() {
        let mut cache = ProjectionCache::new();
        let cars = sample();
        let out = project(
            &mut cache,
            &cars,
            &FilterSpec::new(CarField::Make, "Ford"),
            &SortSpec::new(CarField::Year, SortDirection::Ascending),
        );
        assert_eq!(ids(&out), vec![2, 1]);
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let mut cache = ProjectionCache::new();
        let cars = sample();
        let out = project(
            &mut cache,
            &cars,
            &FilterSpec::new(CarField::Make, ""),
            &SortSpec::new(CarField::Year, SortDirection::Ascending),
        );
        assert_eq!(ids(&out), vec![2, 1, 3]);
    }

    #[test]
    fn empty_input_projects_to_empty() {
        let mut cache = ProjectionCache::new();
        let out = project(&mut cache, &[], &FilterSpec::default(), &SortSpec::default());
        assert!(out.is_empty());
    }

    #[test]
    fn repeat_call_is_served_from_cache() {
        let mut cache = ProjectionCache::new();
        let cars = sample();
        let filter = FilterSpec::new(CarField::Make, "o");
        let sort = SortSpec::new(CarField::Model, SortDirection::Descending);

        let first = project(&mut cache, &cars, &filter, &sort);
        let second = project(&mut cache, &cars, &filter, &sort);

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(cache.computations(), 1);

        project(&mut cache, &cars, &filter, &SortSpec::default());
        assert_eq!(cache.computations(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn filter_is_exact_subset() {
        let mut cache = ProjectionCache::new();
        let cars = sample();
        let filter = FilterSpec::new(CarField::Year, "200");
        let out = project(&mut cache, &cars, &filter, &SortSpec::default());

        assert!(out.iter().all(|c| matches_filter(c, &filter)));
        let expected = cars.iter().filter(|c| matches_filter(c, &filter)).count();
        assert_eq!(out.len(), expected);
        assert_eq!(ids(&out), vec![1, 3]);
    }

    #[test]
    fn filter_matches_numbers_as_text_and_is_case_sensitive() {
        let cars = sample();
        assert!(matches_filter(&cars[1], &FilterSpec::new(CarField::Year, "99")));
        assert!(matches_filter(&cars[0], &FilterSpec::new(CarField::Id, "1")));
        assert!(!matches_filter(&cars[0], &FilterSpec::new(CarField::Make, "ford")));
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let cars = sample();
        let mut cache = ProjectionCache::new();
        let filter = FilterSpec::default();

        let asc = project(
            &mut cache,
            &cars,
            &filter,
            &SortSpec::new(CarField::Year, SortDirection::Ascending),
        );
        // 1 and 3 share 2001 and keep input order
        assert_eq!(ids(&asc), vec![2, 1, 3]);

        let desc = project(
            &mut cache,
            &cars,
            &filter,
            &SortSpec::new(CarField::Year, SortDirection::Descending),
        );
        // a reversed ascending result would give [3, 1, 2]
        assert_eq!(ids(&desc), vec![1, 3, 2]);
    }

    #[test]
    fn text_columns_sort_lexicographically() {
        let cars = sample();
        let mut cache = ProjectionCache::new();
        let out = project(
            &mut cache,
            &cars,
            &FilterSpec::default(),
            &SortSpec::new(CarField::Model, SortDirection::Ascending),
        );
        assert_eq!(ids(&out), vec![2, 1, 3]);
    }
}
