//! Ordered list of cars that owns its projection cache.
//!
//! Every write goes through [`CarList`], which clears the cache before
//! returning, so a projection computed from an older version of the list can
//! never be served.

use crate::cache::{CacheValue, ProjectionCache};
use crate::projection::project;
use crate::{Car, CarToolError, FilterSpec, NewCar, SortSpec};
use log::info;

#[derive(Debug, Default)]
pub struct CarList {
    cars: Vec<Car>,
    cache: ProjectionCache,
}

impl CarList {
    pub fn new(cars: Vec<Car>) -> Self {
        Self {
            cars,
            cache: ProjectionCache::new(),
        }
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    pub fn get(&self, id: u32) -> Result<&Car, CarToolError> {
        self.cars
            .iter()
            .find(|car| car.id == id)
            .ok_or(CarToolError::RecordNotFound(id))
    }

    /// Read-only view of the cache, for hit/miss inspection.
    pub fn cache(&self) -> &ProjectionCache {
        &self.cache
    }

    /// Filtered and sorted cars for display.
    pub fn visible(&mut self, filter: &FilterSpec, sort: &SortSpec) -> CacheValue {
        project(&mut self.cache, &self.cars, filter, sort)
    }

    fn next_id(&self) -> Result<u32, CarToolError> {
        match self.cars.iter().map(|car| car.id).max() {
            Some(max) => max.checked_add(1).ok_or(CarToolError::IdsExhausted),
            None => Ok(1),
        }
    }

    /// Add a car at the end of the list and return the id it was given.
    /// Fails without touching the list once the largest id is `u32::MAX`.
    pub fn append(&mut self, car: NewCar) -> Result<u32, CarToolError> {
        let id = self.next_id()?;
        self.cars.push(car.with_id(id));
        self.cache.invalidate();
        info!("Added car {} ({} cars)", id, self.cars.len());
        Ok(id)
    }

    pub fn remove_by_id(&mut self, id: u32) -> Result<Car, CarToolError> {
        let pos = self
            .cars
            .iter()
            .position(|car| car.id == id)
            .ok_or(CarToolError::RecordNotFound(id))?;
        let removed = self.cars.remove(pos);
        self.cache.invalidate();
        info!("Removed car {} ({} cars)", id, self.cars.len());
        Ok(removed)
    }

    /// Overwrite the car that has the same id, keeping its position.
    pub fn replace_by_id(&mut self, car: Car) -> Result<(), CarToolError> {
        let slot = self
            .cars
            .iter_mut()
            .find(|existing| existing.id == car.id)
            .ok_or(CarToolError::RecordNotFound(car.id))?;
        let id = car.id;
        *slot = car;
        self.cache.invalidate();
        info!("Replaced car {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CarField, SortDirection};

    fn new_car(make: &str, year: u32) -> NewCar {
        NewCar {
            make: make.to_string(),
            model: "Base".to_string(),
            year,
            color: "black".to_string(),
            price: 20_000,
        }
    }

    fn list() -> CarList {
        let mut list = CarList::default();
        list.append(new_car("Ford", 2001)).unwrap();
        list.append(new_car("Ford", 1999)).unwrap();
        list.append(new_car("Kia", 2001)).unwrap();
        list
    }

    fn by_year() -> SortSpec {
        SortSpec::new(CarField::Year, SortDirection::Ascending)
    }

    #[test]
    fn append_assigns_increasing_ids() {
        let mut list = list();
        assert_eq!(list.cars().iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3]);

        list.remove_by_id(3).unwrap();
        assert_eq!(list.append(new_car("Tesla", 2020)), Ok(3));
        list.remove_by_id(1).unwrap();
        assert_eq!(list.append(new_car("Tesla", 2021)), Ok(4));
    }

    #[test]
    fn every_mutation_forces_recompute() {
        let mut list = list();
        let filter = FilterSpec::new(CarField::Make, "Ford");

        list.visible(&filter, &by_year());
        list.visible(&filter, &by_year());
        assert_eq!(list.cache().computations(), 1);

        list.append(new_car("Ford", 2010)).unwrap();
        let after_append = list.visible(&filter, &by_year());
        assert_eq!(list.cache().computations(), 2);
        assert_eq!(after_append.len(), 3);

        let mut edited = list.get(1).unwrap().clone();
        edited.make = "Kia".to_string();
        list.replace_by_id(edited).unwrap();
        let after_replace = list.visible(&filter, &by_year());
        assert_eq!(list.cache().computations(), 3);
        assert_eq!(after_replace.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 4]);

        list.remove_by_id(2).unwrap();
        let after_remove = list.visible(&filter, &by_year());
        assert_eq!(list.cache().computations(), 4);
        assert_eq!(after_remove.len(), 1);
    }

    #[test]
    fn failed_mutations_keep_cache() {
        let mut list = list();
        list.visible(&FilterSpec::default(), &by_year());

        assert_eq!(list.remove_by_id(42), Err(CarToolError::RecordNotFound(42)));
        let ghost = new_car("Ghost", 1900).with_id(99);
        assert_eq!(list.replace_by_id(ghost), Err(CarToolError::RecordNotFound(99)));

        assert_eq!(list.cache().len(), 1);
        list.visible(&FilterSpec::default(), &by_year());
        assert_eq!(list.cache().computations(), 1);
    }

    #[test]
    fn append_refuses_to_wrap_ids() {
        let mut list = CarList::new(vec![new_car("Ford", 2001).with_id(u32::MAX)]);
        list.visible(&FilterSpec::default(), &by_year());

        assert_eq!(list.append(new_car("Kia", 2020)), Err(CarToolError::IdsExhausted));
        assert_eq!(list.len(), 1);
        assert_eq!(list.cache().len(), 1);
    }

    #[test]
    fn replace_keeps_position() {
        let mut list = list();
        let mut edited = list.get(2).unwrap().clone();
        edited.year = 2024;
        list.replace_by_id(edited).unwrap();

        assert_eq!(list.cars()[1].id, 2);
        assert_eq!(list.cars()[1].year, 2024);
        assert_eq!(list.len(), 3);
    }
}
