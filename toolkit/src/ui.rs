use crate::core::Core;
use anyhow::Result;
use bitlib::codec::Codec;
use bitlib::widgets::converter::{ConverterFields, Field};
use bitlib::widgets::shifter::{split_address_tail, Direction, ShifterAction, ShifterState};
use cursive::event::{Event, Key};
use cursive::traits::*;
use cursive::views::{Button, Dialog, EditView, LinearLayout, TextView};
use cursive::Cursive;
use tracing::*;

const CONVERTER_FIELDS: [(&str, Field); 4] = [
    ("uint256", Field::Uint),
    ("int256", Field::Int),
    ("hex", Field::Hex),
    ("binary", Field::Binary),
];

struct UiState {
    codec: Codec,
    converter: ConverterFields,
    shifter: ShifterState,
}

pub fn run_ui(core: Core) -> Result<()> {
    let mut siv = cursive::default();
    siv.set_user_data(UiState {
        codec: core.codec,
        converter: ConverterFields::default(),
        shifter: ShifterState::new(core.codec.width()),
    });
    setup_siv(&mut siv);
    info!("Starting UI event loop");
    siv.run();
    info!("UI event loop ended");
    Ok(())
}

fn setup_siv(siv: &mut Cursive) {
    siv.set_window_title("bitbench".to_string());
    setup_menubar(siv);
    show_converter(siv);
    siv.add_global_callback(Event::Key(Key::Esc), |siv| siv.select_menubar());
}

fn setup_menubar(siv: &mut Cursive) {
    siv.menubar()
        .add_leaf("Converter", show_converter)
        .add_leaf("Shifter", show_shifter)
        .add_leaf("Quit", |s| {
            info!("Quit command received");
            s.quit()
        });
    siv.set_autohide_menu(false)
}

fn field_text(fields: &ConverterFields, field: Field) -> String {
    match field {
        Field::Uint => fields.uint.clone(),
        Field::Int => fields.int.clone(),
        Field::Hex => fields.hex.clone(),
        Field::Binary => fields.binary.clone(),
    }
}

fn show_converter(s: &mut Cursive) {
    debug!("Showing converter");
    let (fields, padded) = s
        .with_user_data(|state: &mut UiState| {
            (
                state.converter.clone(),
                state.converter.padded_hex(&state.codec),
            )
        })
        .unwrap_or_default();

    let mut layout = LinearLayout::vertical();
    for (name, field) in CONVERTER_FIELDS {
        let edit = EditView::new()
            .content(field_text(&fields, field))
            .on_edit(move |s, text, _cursor| edit_converter(s, field, text))
            .with_name(name)
            .min_width(72);
        layout.add_child(
            LinearLayout::horizontal()
                .child(TextView::new(format!("{name:>8} ")))
                .child(edit),
        );
    }
    layout.add_child(TextView::new(padded.unwrap_or_default()).with_name("padded"));

    s.pop_layer();
    s.add_layer(Dialog::around(layout).title("Universal Value Converter"));
}

fn edit_converter(s: &mut Cursive, field: Field, text: &str) {
    let Some((fields, padded)) = s.with_user_data(|state: &mut UiState| {
        state.converter = std::mem::take(&mut state.converter).reduce(&state.codec, field, text);
        (
            state.converter.clone(),
            state.converter.padded_hex(&state.codec),
        )
    }) else {
        return;
    };
    for (name, other) in CONVERTER_FIELDS {
        if other == field {
            continue;
        }
        let content = field_text(&fields, other);
        s.call_on_name(name, |view: &mut EditView| {
            let _ = view.set_content(content);
        });
    }
    s.call_on_name("padded", |view: &mut TextView| {
        view.set_content(padded.unwrap_or_default())
    });
}

fn render_shifter(state: &ShifterState) -> String {
    let mut out = String::new();
    if let Some(error) = &state.error {
        out.push_str(&format!("Error: {error}\n\n"));
    }
    let highlight = |hex: &str| {
        let (head, tail) = split_address_tail(hex);
        format!("{head}[{tail}]")
    };
    out.push_str("Original Number\n");
    out.push_str(&state.original_padded().map(|h| highlight(&h)).unwrap_or_default());
    out.push_str("\n\nShifted Result\n");
    out.push_str(&state.current_padded().map(|h| highlight(&h)).unwrap_or_default());
    out.push_str("\n\nExecuted Instructions\n");
    for line in &state.history {
        out.push_str(&format!("- {line}\n"));
    }
    out
}

fn update_shifter(s: &mut Cursive, action: ShifterAction) {
    let Some(text) = s.with_user_data(|state: &mut UiState| {
        let current = std::mem::replace(&mut state.shifter, ShifterState::new(state.codec.width()));
        state.shifter = current.reduce(action);
        render_shifter(&state.shifter)
    }) else {
        return;
    };
    s.call_on_name("shift_output", |view: &mut TextView| view.set_content(text));
}

fn shift_button(label: &str, direction: Direction) -> Button {
    Button::new(label, move |s| {
        update_shifter(s, ShifterAction::SetDirection(direction));
        update_shifter(s, ShifterAction::Calculate);
    })
}

fn show_shifter(s: &mut Cursive) {
    debug!("Showing shifter");
    let Some(state) = s.with_user_data(|state: &mut UiState| state.shifter.clone()) else {
        return;
    };

    let input = EditView::new()
        .content(state.input.clone())
        .on_edit(|s, text, _cursor| update_shifter(s, ShifterAction::SetInput(text.to_string())))
        .with_name("shift_input")
        .min_width(72);
    let amount = EditView::new()
        .content(state.amount.to_string())
        .on_edit(|s, text, _cursor| {
            let amount = text.trim().parse().unwrap_or(0);
            update_shifter(s, ShifterAction::SetAmount(amount))
        })
        .with_name("shift_amount")
        .fixed_width(8);
    let buttons = LinearLayout::horizontal()
        .child(shift_button("Shift left", Direction::Left))
        .child(shift_button("Shift right", Direction::Right))
        .child(Button::new("Reset", |s| {
            update_shifter(s, ShifterAction::Reset);
            s.call_on_name("shift_input", |view: &mut EditView| {
                let _ = view.set_content("");
            });
            s.call_on_name("shift_amount", |view: &mut EditView| {
                let _ = view.set_content("0");
            });
        }));

    let layout = LinearLayout::vertical()
        .child(
            LinearLayout::horizontal()
                .child(TextView::new("Number (Hex): "))
                .child(input),
        )
        .child(
            LinearLayout::horizontal()
                .child(TextView::new("Shift Amount (Bits): "))
                .child(amount),
        )
        .child(buttons)
        .child(TextView::new(render_shifter(&state)).with_name("shift_output"));

    s.pop_layer();
    s.add_layer(Dialog::around(layout).title("Bit Shift Visualizer"));
}
