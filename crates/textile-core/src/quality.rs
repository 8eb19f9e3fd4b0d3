//! 品質主檔查詢

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::arith;

/// 品質主檔（織物規格）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quality {
    /// 品質代號
    pub id: String,

    /// 筘數
    pub reed: Option<Decimal>,

    /// 緯密
    pub pick: Option<Decimal>,

    /// 整經幅寬參數
    pub g5: Option<Decimal>,

    /// 幅寬（未設定 G5 時使用）
    pub width: Option<Decimal>,

    /// 經紗支數
    pub warp: Option<Decimal>,

    /// 緯紗支數
    pub weft: Option<Decimal>,
}

impl Quality {
    /// 創建品質主檔
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reed: None,
            pick: None,
            g5: None,
            width: None,
            warp: None,
            weft: None,
        }
    }

    /// 建構器模式：設置筘數與緯密
    pub fn with_density(mut self, reed: Decimal, pick: Decimal) -> Self {
        self.reed = Some(reed);
        self.pick = Some(pick);
        self
    }

    /// 建構器模式：設置經緯紗支數
    pub fn with_counts(mut self, warp: Decimal, weft: Decimal) -> Self {
        self.warp = Some(warp);
        self.weft = Some(weft);
        self
    }

    /// 建構器模式：設置 G5
    pub fn with_g5(mut self, g5: Decimal) -> Self {
        self.g5 = Some(g5);
        self
    }

    /// 建構器模式：設置幅寬
    pub fn with_width(mut self, width: Decimal) -> Self {
        self.width = Some(width);
        self
    }

    /// 整經計算用幅寬：優先 G5，其次幅寬
    pub fn g5_or_width(&self) -> Decimal {
        arith::or_zero(self.g5.or(self.width))
    }
}

/// 唯讀的品質主檔查詢（由外部資料存取層提供）
///
/// 查無資料時回傳 `None`，不得拋出錯誤。
pub trait QualityLookup {
    fn find_quality_by_id(&self, id: &str) -> Option<Quality>;
}

/// 沒有任何品質主檔的查詢
#[derive(Debug, Clone, Copy, Default)]
pub struct NoQualities;

impl QualityLookup for NoQualities {
    fn find_quality_by_id(&self, _id: &str) -> Option<Quality> {
        None
    }
}

/// 記憶體內的品質主檔
#[derive(Debug, Clone, Default)]
pub struct QualityCatalog {
    qualities: HashMap<String, Quality>,
}

impl QualityCatalog {
    /// 創建空的主檔
    pub fn new() -> Self {
        Self::default()
    }

    /// 新增或覆蓋品質
    pub fn insert(&mut self, quality: Quality) {
        self.qualities.insert(quality.id.clone(), quality);
    }

    /// 建構器模式：新增品質
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.insert(quality);
        self
    }

    pub fn len(&self) -> usize {
        self.qualities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qualities.is_empty()
    }
}

impl FromIterator<Quality> for QualityCatalog {
    fn from_iter<I: IntoIterator<Item = Quality>>(iter: I) -> Self {
        Self {
            qualities: iter.into_iter().map(|q| (q.id.clone(), q)).collect(),
        }
    }
}

impl QualityLookup for QualityCatalog {
    fn find_quality_by_id(&self, id: &str) -> Option<Quality> {
        self.qualities.get(id).cloned()
    }
}

impl<T: QualityLookup + ?Sized> QualityLookup for &T {
    fn find_quality_by_id(&self, id: &str) -> Option<Quality> {
        (**self).find_quality_by_id(id)
    }
}
