//! Yew view components for the Car Tool UI.
//!
//! Components hold only form-local state; the car list, filter, sort and
//! confirmation state live in `CarToolState` and reach them through props.

use car_tool::config::DEBOUNCE_MS;
use car_tool::utils::{format_price, parse_price, validate_text_field, validate_year};
use car_tool::{Car, CarField, FilterSpec, NewCar, SortSpec};
use gloo_timers::callback::Timeout;
use log::warn;
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::hooks::{use_validated_input, ValidatedInput};

/// Create a debounced callback that cancels any previous pending call
fn debounce_callback<T: 'static>(
    timer_handle: &UseStateHandle<Option<Timeout>>,
    callback: Callback<T>,
    value: T,
    delay_ms: u32,
) {
    // Cancel any existing timer by replacing it
    timer_handle.set(None);

    let timer_handle_clone = timer_handle.clone();
    let handle = Timeout::new(delay_ms, move || {
        callback.emit(value);
        timer_handle_clone.set(None);
    });
    timer_handle.set(Some(handle));
}

fn text_parser(field_name: &'static str) -> Rc<dyn Fn(&str) -> Result<String, String>> {
    Rc::new(move |s: &str| validate_text_field(s, field_name))
}

fn year_parser() -> Rc<dyn Fn(&str) -> Result<u32, String>> {
    Rc::new(validate_year)
}

fn price_parser() -> Rc<dyn Fn(&str) -> Result<u32, String>> {
    Rc::new(parse_price)
}

/// Text box bound to a validated field, with its error message underneath.
fn render_input<T: 'static>(id: &str, label: &str, input: &ValidatedInput<T>) -> Html {
    html! {
        <div class="form-group">
            <label for={id.to_string()}>{ label }</label>
            <input type="text"
                id={id.to_string()}
                value={input.text.clone()}
                oninput={input.on_text_input.clone()}
                onblur={input.on_commit.reform(|_: FocusEvent| ())}
            />
            if let Some(err) = &input.error {
                <span class="error-message">{ err.clone() }</span>
            }
        </div>
    }
}

/// Same as [`render_input`] but fitted into a table cell.
fn render_cell_input<T: 'static>(input: &ValidatedInput<T>) -> Html {
    html! {
        <td>
            <input type="text"
                value={input.text.clone()}
                oninput={input.on_text_input.clone()}
                onblur={input.on_commit.reform(|_: FocusEvent| ())}
            />
            if let Some(err) = &input.error {
                <div class="error-message">{ err.clone() }</div>
            }
        </td>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToolHeaderProps {
    pub header_text: AttrValue,
}

#[function_component(ToolHeader)]
pub fn tool_header(props: &ToolHeaderProps) -> Html {
    html! {
        <header class="page-header">
            <h1>{ props.header_text.to_string() }</h1>
        </header>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToolFooterProps {
    pub company_name: AttrValue,
}

#[function_component(ToolFooter)]
pub fn tool_footer(props: &ToolFooterProps) -> Html {
    html! {
        <footer class="page-footer">
            <small>{ format!("© {}", props.company_name) }</small>
        </footer>
    }
}

/// Field selector plus substring box. Typing is debounced; changing the
/// field applies at once.
#[derive(Properties, PartialEq)]
pub struct CarTableFilterFormProps {
    pub filter: FilterSpec,
    pub on_filter: Callback<FilterSpec>,
}

#[function_component(CarTableFilterForm)]
pub fn car_table_filter_form(props: &CarTableFilterFormProps) -> Html {
    let field = use_state(|| props.filter.field);
    let value = use_state(|| props.filter.value.clone());
    let debounce_timer = use_state(|| None::<Timeout>);

    let on_field_change = {
        let field = field.clone();
        let value = value.clone();
        let on_filter = props.on_filter.clone();
        let debounce_timer = debounce_timer.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<CarField>() {
                Ok(new_field) => {
                    debounce_timer.set(None);
                    field.set(new_field);
                    on_filter.emit(FilterSpec::new(new_field, (*value).clone()));
                }
                Err(e) => warn!("{}", e),
            }
        })
    };

    let on_value_input = {
        let field = field.clone();
        let value = value.clone();
        let on_filter = props.on_filter.clone();
        let debounce_timer = debounce_timer.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let text = input.value();
            value.set(text.clone());
            debounce_callback(
                &debounce_timer,
                on_filter.clone(),
                FilterSpec::new(*field, text),
                DEBOUNCE_MS,
            );
        })
    };

    html! {
        <form class="filter-form" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
            <div class="form-group">
                <label for="filter-field">{ "Filter Field:" }</label>
                <select id="filter-field" onchange={on_field_change}>
                    { CarField::ALL.iter().map(|f| html! {
                        <option value={f.name()} selected={*f == *field}>{ f.label() }</option>
                    }).collect::<Html>() }
                </select>
            </div>
            <div class="form-group">
                <label for="filter-value">{ "Filter Value:" }</label>
                <input type="text" id="filter-value"
                    value={(*value).clone()}
                    oninput={on_value_input}
                />
            </div>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct CarTableProps {
    pub cars: Rc<[Car]>,
    pub edit_car_id: Option<u32>,
    pub sort: SortSpec,
    pub on_edit_car: Callback<u32>,
    pub on_delete_car: Callback<u32>,
    pub on_save_car: Callback<Car>,
    pub on_cancel_car: Callback<()>,
    pub on_sort: Callback<CarField>,
}

/// Renders the car table. Header cells are sort buttons; the row being
/// edited turns into inputs.
#[function_component(CarTable)]
pub fn car_table(props: &CarTableProps) -> Html {
    html! {
        <table class="car-table">
            <thead>
                <tr>
                    { CarField::ALL.iter().map(|&field| {
                        let on_sort = props.on_sort.clone();
                        let arrow = if props.sort.field == field {
                            props.sort.direction.arrow()
                        } else {
                            ""
                        };
                        html! {
                            <th>
                                <button type="button" class="sort-button"
                                    onclick={Callback::from(move |_: MouseEvent| on_sort.emit(field))}>
                                    { format!("{} {}", field.label(), arrow).trim_end().to_string() }
                                </button>
                            </th>
                        }
                    }).collect::<Html>() }
                    <th>{ "Actions" }</th>
                </tr>
            </thead>
            <tbody>
                if props.cars.is_empty() {
                    <tr>
                        <td colspan={(CarField::ALL.len() + 1).to_string()} class="no-results-message">
                            { "No cars match the filter" }
                        </td>
                    </tr>
                } else {
                    { props.cars.iter().map(|car| {
                        if props.edit_car_id == Some(car.id) {
                            html! {
                                <CarEditRow key={car.id} car={car.clone()}
                                    on_save_car={props.on_save_car.clone()}
                                    on_cancel_car={props.on_cancel_car.clone()} />
                            }
                        } else {
                            html! {
                                <CarViewRow key={car.id} car={car.clone()}
                                    on_edit_car={props.on_edit_car.clone()}
                                    on_delete_car={props.on_delete_car.clone()} />
                            }
                        }
                    }).collect::<Html>() }
                }
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq)]
pub struct CarViewRowProps {
    pub car: Car,
    pub on_edit_car: Callback<u32>,
    pub on_delete_car: Callback<u32>,
}

#[function_component(CarViewRow)]
pub fn car_view_row(props: &CarViewRowProps) -> Html {
    let id = props.car.id;
    let on_edit = props.on_edit_car.reform(move |_: MouseEvent| id);
    let on_delete = props.on_delete_car.reform(move |_: MouseEvent| id);
    let car = &props.car;

    html! {
        <tr>
            <td>{ car.id }</td>
            <td>{ car.make.clone() }</td>
            <td>{ car.model.clone() }</td>
            <td>{ car.year }</td>
            <td>{ car.color.clone() }</td>
            <td>{ format_price(car.price) }</td>
            <td>
                <button type="button" onclick={on_edit}>{ "Edit" }</button>
                <button type="button" onclick={on_delete}>{ "Delete" }</button>
            </td>
        </tr>
    }
}

#[derive(Properties, PartialEq)]
pub struct CarEditRowProps {
    pub car: Car,
    pub on_save_car: Callback<Car>,
    pub on_cancel_car: Callback<()>,
}

#[function_component(CarEditRow)]
pub fn car_edit_row(props: &CarEditRowProps) -> Html {
    let car = &props.car;
    let make = use_validated_input(car.make.clone(), text_parser("Make"));
    let model = use_validated_input(car.model.clone(), text_parser("Model"));
    let year = use_validated_input(car.year.to_string(), year_parser());
    let color = use_validated_input(car.color.clone(), text_parser("Color"));
    let price = use_validated_input(car.price.to_string(), price_parser());

    let on_save = {
        let id = car.id;
        let on_save_car = props.on_save_car.clone();
        let (make, model, year, color, price) =
            (make.clone(), model.clone(), year.clone(), color.clone(), price.clone());
        Callback::from(move |_: MouseEvent| {
            // Validate every field so all errors show at once
            let parsed = (
                make.validate(),
                model.validate(),
                year.validate(),
                color.validate(),
                price.validate(),
            );
            if let (Ok(make), Ok(model), Ok(year), Ok(color), Ok(price)) = parsed {
                on_save_car.emit(Car {
                    id,
                    make,
                    model,
                    year,
                    color,
                    price,
                });
            }
        })
    };
    let on_cancel = props.on_cancel_car.reform(|_: MouseEvent| ());

    html! {
        <tr class="edit-row">
            <td>{ car.id }</td>
            { render_cell_input(&make) }
            { render_cell_input(&model) }
            { render_cell_input(&year) }
            { render_cell_input(&color) }
            { render_cell_input(&price) }
            <td>
                <button type="button" onclick={on_save}>{ "Save" }</button>
                <button type="button" onclick={on_cancel}>{ "Cancel" }</button>
            </td>
        </tr>
    }
}

#[derive(Properties, PartialEq)]
pub struct CarFormProps {
    pub button_text: AttrValue,
    pub on_submit_car: Callback<NewCar>,
}

/// Form for adding a car. Clears itself after a successful submit.
#[function_component(CarForm)]
pub fn car_form(props: &CarFormProps) -> Html {
    let make = use_validated_input(String::new(), text_parser("Make"));
    let model = use_validated_input(String::new(), text_parser("Model"));
    let year = use_validated_input(String::new(), year_parser());
    let color = use_validated_input(String::new(), text_parser("Color"));
    let price = use_validated_input(String::new(), price_parser());

    let on_submit = {
        let on_submit_car = props.on_submit_car.clone();
        let (make, model, year, color, price) =
            (make.clone(), model.clone(), year.clone(), color.clone(), price.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let parsed = (
                make.validate(),
                model.validate(),
                year.validate(),
                color.validate(),
                price.validate(),
            );
            if let (Ok(make_val), Ok(model_val), Ok(year_val), Ok(color_val), Ok(price_val)) =
                parsed
            {
                on_submit_car.emit(NewCar {
                    make: make_val,
                    model: model_val,
                    year: year_val,
                    color: color_val,
                    price: price_val,
                });
                for reset in [&make.reset, &model.reset, &year.reset, &color.reset, &price.reset] {
                    reset.emit(());
                }
            }
        })
    };

    html! {
        <form class="car-form" onsubmit={on_submit}>
            { render_input("make-input", "Make:", &make) }
            { render_input("model-input", "Model:", &model) }
            { render_input("year-input", "Year:", &year) }
            { render_input("color-input", "Color:", &color) }
            { render_input("price-input", "Price:", &price) }
            <button type="submit">{ props.button_text.to_string() }</button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
    pub on_yes: Callback<()>,
    pub on_no: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ConfirmModal)]
pub fn confirm_modal(props: &ConfirmModalProps) -> Html {
    html! {
        <div class="modal-backdrop">
            <div class="modal" role="dialog">
                <p>{ props.children.clone() }</p>
                <div class="modal-buttons">
                    <button type="button" onclick={props.on_yes.reform(|_: MouseEvent| ())}>{ "Yes" }</button>
                    <button type="button" onclick={props.on_no.reform(|_: MouseEvent| ())}>{ "No" }</button>
                </div>
            </div>
        </div>
    }
}
