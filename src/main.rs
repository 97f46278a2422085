//! Main module for the Car Tool application using Yew.
//! Wires UI components to the `CarToolState` transitions.

use car_tool::config::{ADD_BUTTON_TEXT, COMPANY_NAME, HEADER_TEXT, SEED_CSV};
use car_tool::{read_cars_from_csv_string, Car, CarField, CarToolState, FilterSpec, NewCar};
use log::{error, warn};
use std::rc::Rc;
use yew::prelude::*;

mod components;
mod hooks;

use components::{CarForm, CarTable, CarTableFilterForm, ConfirmModal, ToolFooter, ToolHeader};

/// Helper to bump the state version and trigger a UI re-render
fn update_state_version(state_version: &UseStateHandle<usize>) {
    state_version.set(state_version.wrapping_add(1));
}

#[derive(Properties, PartialEq)]
struct CarToolProps {
    cars: Rc<Vec<Car>>,
}

/// The car tool widget. Owns the `CarToolState` (and with it the projection
/// cache) for as long as it is mounted.
#[function_component(CarTool)]
fn car_tool(props: &CarToolProps) -> Html {
    let state = use_mut_ref(|| CarToolState::new(props.cars.to_vec()));
    let state_version = use_state(|| 0usize);

    let on_filter = {
        let state = state.clone();
        let state_version = state_version.clone();
        Callback::from(move |filter: FilterSpec| {
            state.borrow_mut().set_filter(filter);
            update_state_version(&state_version);
        })
    };

    let on_sort = {
        let state = state.clone();
        let state_version = state_version.clone();
        Callback::from(move |field: CarField| {
            state.borrow_mut().sort_by(field);
            update_state_version(&state_version);
        })
    };

    let on_edit_car = {
        let state = state.clone();
        let state_version = state_version.clone();
        Callback::from(move |id: u32| {
            state.borrow_mut().edit_car(id);
            update_state_version(&state_version);
        })
    };

    let on_cancel_car = {
        let state = state.clone();
        let state_version = state_version.clone();
        Callback::from(move |_: ()| {
            state.borrow_mut().cancel_car();
            update_state_version(&state_version);
        })
    };

    let on_save_car = {
        let state = state.clone();
        let state_version = state_version.clone();
        Callback::from(move |car: Car| {
            if let Err(e) = state.borrow_mut().save_car(car) {
                warn!("Could not save car: {}", e);
            }
            update_state_version(&state_version);
        })
    };

    let on_add_car = {
        let state = state.clone();
        let state_version = state_version.clone();
        Callback::from(move |car: NewCar| {
            if let Err(e) = state.borrow_mut().add_car(car) {
                warn!("Could not add car: {}", e);
            }
            update_state_version(&state_version);
        })
    };

    let on_delete_car = {
        let state = state.clone();
        let state_version = state_version.clone();
        Callback::from(move |id: u32| {
            state.borrow_mut().request_delete(id);
            update_state_version(&state_version);
        })
    };

    let on_confirm_delete = {
        let state = state.clone();
        let state_version = state_version.clone();
        Callback::from(move |_: ()| {
            if let Err(e) = state.borrow_mut().confirm_delete() {
                warn!("Delete failed: {}", e);
            }
            update_state_version(&state_version);
        })
    };

    let on_cancel_delete = {
        let state = state.clone();
        let state_version = state_version.clone();
        Callback::from(move |_: ()| {
            state.borrow_mut().cancel_delete();
            update_state_version(&state_version);
        })
    };

    let (cars, filter, sort, edit_car_id, delete_summary) = {
        let mut current = state.borrow_mut();
        let cars = current.visible_cars();
        let summary = match current.pending_delete_summary() {
            Some(Ok(label)) => Some(label),
            Some(Err(e)) => {
                warn!("Pending delete refers to a missing car: {}", e);
                None
            }
            None => None,
        };
        let filter = current.filter().clone();
        let sort = current.sort();
        let edit_car_id = current.edit_car_id();
        (cars, filter, sort, edit_car_id, summary)
    };

    html! {
        <>
            <ToolHeader header_text={HEADER_TEXT} />
            <CarTableFilterForm filter={filter} on_filter={on_filter} />
            <CarTable cars={cars}
                edit_car_id={edit_car_id}
                sort={sort}
                on_edit_car={on_edit_car}
                on_delete_car={on_delete_car}
                on_save_car={on_save_car}
                on_cancel_car={on_cancel_car}
                on_sort={on_sort} />
            <CarForm button_text={ADD_BUTTON_TEXT} on_submit_car={on_add_car} />
            <ToolFooter company_name={COMPANY_NAME} />
            if let Some(label) = delete_summary {
                <ConfirmModal on_yes={on_confirm_delete} on_no={on_cancel_delete}>
                    { format!("Are you sure you want to delete {}?", label) }
                </ConfirmModal>
            }
        </>
    }
}

/// App wrapper loading the seed cars.
#[function_component]
pub fn App() -> Html {
    let cars = use_memo((), |_| match read_cars_from_csv_string(SEED_CSV) {
        Ok(cars) => cars,
        Err(e) => {
            error!("{}", e);
            Vec::new()
        }
    });

    html! {
        <CarTool cars={cars} />
    }
}

/// Entry point: initializes Yew renderer for the App component.
fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
