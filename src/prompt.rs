//! 対話式の商品入力

use crate::error::Result;
use dialoguer::Input;
use inventory_common::{FormField, FormState, ValidationError};

/// フォームの各項目を順に入力させる
///
/// 既に値がある項目はその値を初期値として表示する。
pub fn fill_form_interactive(form: &mut FormState) -> Result<()> {
    println!("商品情報を入力してください（* は必須）\n");

    for field in FormField::ALL {
        let current = form.get(field).to_string();
        let value = prompt_field(field, &current)?;
        form.set_field(field, value);
    }

    println!();
    Ok(())
}

fn prompt_label(field: FormField) -> String {
    if field.is_required() {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    }
}

fn prompt_field(field: FormField, current: &str) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt(prompt_label(field))
        .allow_empty(!field.is_required());

    if !current.is_empty() {
        input = input.with_initial_text(current);
    }

    if field == FormField::Quantity {
        input = input.validate_with(|value: &String| -> std::result::Result<(), String> {
            check_quantity(value).map_err(|e| e.to_string())
        });
    }

    Ok(input.interact_text()?)
}

fn check_quantity(value: &str) -> std::result::Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.parse::<u32>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::InvalidQuantity(value.to_string()))
    }
}
