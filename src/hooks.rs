use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Holds the state and callbacks for a validated form field.
#[derive(Clone)]
pub struct ValidatedInput<T: 'static> {
    /// The current text content of the input field.
    pub text: String,
    /// An optional error message if validation failed.
    pub error: Option<String>,
    /// Callback for the text input's `oninput` event. Updates the internal text state.
    pub on_text_input: Callback<InputEvent>,
    /// Callback to validate the current text and show or clear the error.
    /// Typically used with `onblur`.
    pub on_commit: Callback<()>,
    /// Callback to put the field back to its initial text with no error.
    pub reset: Callback<()>,
    parse: Rc<dyn Fn(&str) -> Result<T, String>>,
    error_setter: UseStateHandle<Option<String>>,
}

impl<T: 'static> ValidatedInput<T> {
    /// Parse the current text right now, updating the error display.
    pub fn validate(&self) -> Result<T, String> {
        let result = (self.parse)(self.text.as_str());
        self.error_setter.set(result.as_ref().err().cloned());
        result
    }
}

/// Custom hook to manage state for a validated form field.
///
/// `initial_text` is what the field shows at first and after `reset`; when it
/// changes (for example the edit row is reused for another car) the field is
/// reset to it.
#[hook]
pub fn use_validated_input<T: 'static>(
    initial_text: String,
    parse_and_validate: Rc<dyn Fn(&str) -> Result<T, String>>,
) -> ValidatedInput<T> {
    let text_state_handle: UseStateHandle<String> = use_state(|| initial_text.clone());
    let error_state_handle: UseStateHandle<Option<String>> = use_state(|| None::<String>);

    let on_text_input = {
        let text_setter = text_state_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let on_commit = {
        let current_text_handle = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        let parse_fn = parse_and_validate.clone();

        Callback::from(move |_| {
            error_setter.set(parse_fn(current_text_handle.as_str()).err());
        })
    };

    let reset = {
        let text_setter = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        let initial = initial_text.clone();
        Callback::from(move |_| {
            text_setter.set(initial.clone());
            error_setter.set(None);
        })
    };

    // Follow the initial text when the caller switches it
    {
        let text_setter_for_effect = text_state_handle.clone();
        let error_setter_for_effect = error_state_handle.clone();

        use_effect_with(initial_text, move |current_initial| {
            text_setter_for_effect.set(current_initial.clone());
            error_setter_for_effect.set(None);
            || ()
        });
    }

    ValidatedInput {
        text: (*text_state_handle).clone(),
        error: (*error_state_handle).clone(),
        on_text_input,
        on_commit,
        reset,
        parse: parse_and_validate,
        error_setter: error_state_handle,
    }
}
