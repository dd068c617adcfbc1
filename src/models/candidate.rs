use serde::{Deserialize, Serialize};

/// 候选人记录
///
/// 从 CSV 数据源的一行构建，加载后只读。
/// 除姓名外的字段都是可选的，缺失时默认为空字符串。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    /// 目标职位，必须与网页下拉框中的可见文本完全一致
    #[serde(default)]
    pub vacancy: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub date_of_application: String,
    #[serde(default)]
    pub notes: String,
}

impl Default for Candidate {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            vacancy: String::new(),
            contact_number: String::new(),
            keywords: String::new(),
            date_of_application: String::new(),
            notes: String::new(),
        }
    }
}

impl Candidate {
    /// 用于日志和汇总的显示名称
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
