//! 入力フォームの状態
//!
//! 追加前の8項目を文字列のまま保持し、送信時に検証して
//! `ProductRecord` に変換する。永続化はしない。

use crate::error::{Result, ValidationError};
use crate::storage::KeyValueStorage;
use crate::store::{InventoryStore, Mutation};
use crate::types::{timestamp_now, ProductRecord};

/// フォーム項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ProductId,
    ProductName,
    Size,
    Color,
    Quantity,
    Price,
    Category,
    Brand,
}

impl FormField {
    /// フォームの表示順
    pub const ALL: [FormField; 8] = [
        FormField::ProductId,
        FormField::ProductName,
        FormField::Size,
        FormField::Color,
        FormField::Quantity,
        FormField::Price,
        FormField::Category,
        FormField::Brand,
    ];

    /// 保存形式と同じキー名
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::ProductId => "productId",
            FormField::ProductName => "productName",
            FormField::Size => "size",
            FormField::Color => "color",
            FormField::Quantity => "quantity",
            FormField::Price => "price",
            FormField::Category => "category",
            FormField::Brand => "brand",
        }
    }

    /// 一覧表の見出し
    pub fn label(&self) -> &'static str {
        match self {
            FormField::ProductId => "Product ID",
            FormField::ProductName => "Name",
            FormField::Size => "Size",
            FormField::Color => "Color",
            FormField::Quantity => "Qty",
            FormField::Price => "Price",
            FormField::Category => "Category",
            FormField::Brand => "Brand",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, FormField::ProductId | FormField::ProductName)
    }
}

impl std::str::FromStr for FormField {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FormField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownField(s.to_string()))
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 数量の既定値
const DEFAULT_QUANTITY: &str = "0";

/// 入力中の値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    product_id: String,
    product_name: String,
    size: String,
    color: String,
    quantity: String,
    price: String,
    category: String,
    brand: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            product_id: String::new(),
            product_name: String::new(),
            size: String::new(),
            color: String::new(),
            quantity: DEFAULT_QUANTITY.to_string(),
            price: String::new(),
            category: String::new(),
            brand: String::new(),
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::ProductId => &mut self.product_id,
            FormField::ProductName => &mut self.product_name,
            FormField::Size => &mut self.size,
            FormField::Color => &mut self.color,
            FormField::Quantity => &mut self.quantity,
            FormField::Price => &mut self.price,
            FormField::Category => &mut self.category,
            FormField::Brand => &mut self.brand,
        }
    }

    /// 1項目を置き換え（検証しない）
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::ProductId => &self.product_id,
            FormField::ProductName => &self.product_name,
            FormField::Size => &self.size,
            FormField::Color => &self.color,
            FormField::Quantity => &self.quantity,
            FormField::Price => &self.price,
            FormField::Category => &self.category,
            FormField::Brand => &self.brand,
        }
    }

    /// 全項目を既定値に戻す
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 入力値を検証してレコードを作る
    ///
    /// 空白のみの `productId` / `productName` は未入力扱い。
    /// 数量は前後の空白を除いて解釈し、空なら 0。
    pub fn validate(&self) -> std::result::Result<ProductRecord, ValidationError> {
        if self.product_id.trim().is_empty() {
            return Err(ValidationError::MissingProductId);
        }
        if self.product_name.trim().is_empty() {
            return Err(ValidationError::MissingProductName);
        }

        Ok(ProductRecord {
            product_id: self.product_id.clone(),
            product_name: self.product_name.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
            quantity: parse_quantity(&self.quantity)?,
            price: self.price.clone(),
            category: self.category.clone(),
            brand: self.brand.clone(),
            last_updated: timestamp_now(),
        })
    }

    /// 検証してストアに追加し、成功したらフォームを空に戻す
    ///
    /// 保存だけが失敗した場合もメモリ上は追加済みなのでリセットする。
    pub fn submit<S: KeyValueStorage>(&mut self, store: &mut InventoryStore<S>) -> Result<Mutation> {
        let record = self.validate()?;
        let mutation = store.add(record)?;
        self.reset();
        Ok(mutation)
    }
}

fn parse_quantity(raw: &str) -> std::result::Result<u32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidQuantity(raw.to_string()))
}
