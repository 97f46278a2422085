//! State of the car tool widget, independent of the UI layer.
//!
//! The Yew front end keeps one [`CarToolState`] and calls these methods from
//! its event callbacks; each one is a plain synchronous transition.

use crate::cache::CacheValue;
use crate::car_list::CarList;
use crate::confirm::DeleteConfirmation;
use crate::{Car, CarField, CarToolError, FilterSpec, NewCar, SortSpec};
use log::warn;

#[derive(Debug, Default)]
pub struct CarToolState {
    list: CarList,
    filter: FilterSpec,
    sort: SortSpec,
    edit_car_id: Option<u32>,
    delete: DeleteConfirmation,
}

impl CarToolState {
    pub fn new(cars: Vec<Car>) -> Self {
        Self {
            list: CarList::new(cars),
            ..Self::default()
        }
    }

    pub fn list(&self) -> &CarList {
        &self.list
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn edit_car_id(&self) -> Option<u32> {
        self.edit_car_id
    }

    pub fn delete_state(&self) -> DeleteConfirmation {
        self.delete
    }

    /// Cars to render, in display order.
    pub fn visible_cars(&mut self) -> CacheValue {
        self.list.visible(&self.filter, &self.sort)
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
    }

    /// Header click on `field`.
    pub fn sort_by(&mut self, field: CarField) {
        self.sort = self.sort.toggled(field);
    }

    pub fn add_car(&mut self, car: NewCar) -> Result<u32, CarToolError> {
        let id = self.list.append(car)?;
        self.cancel_car();
        Ok(id)
    }

    pub fn edit_car(&mut self, id: u32) {
        self.edit_car_id = Some(id);
    }

    pub fn cancel_car(&mut self) {
        self.edit_car_id = None;
    }

    pub fn save_car(&mut self, car: Car) -> Result<(), CarToolError> {
        self.list.replace_by_id(car)?;
        self.cancel_car();
        Ok(())
    }

    pub fn request_delete(&mut self, id: u32) {
        self.delete = self.delete.request(id);
    }

    /// Delete the car awaiting confirmation. Returns the removed car, or
    /// `None` when nothing was pending.
    pub fn confirm_delete(&mut self) -> Result<Option<Car>, CarToolError> {
        let (next, id) = self.delete.confirm();
        self.delete = next;
        let Some(id) = id else {
            return Ok(None);
        };

        self.cancel_car();
        match self.list.remove_by_id(id) {
            Ok(car) => Ok(Some(car)),
            Err(e) => {
                warn!("Confirmed delete of car {} that no longer exists", id);
                Err(e)
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        self.delete = self.delete.cancel();
    }

    /// Label for the confirmation prompt: "make model year" of the pending car.
    pub fn pending_delete_summary(&self) -> Option<Result<String, CarToolError>> {
        self.delete
            .pending()
            .map(|id| self.list.get(id).map(Car::summary))
    }
}
