//! 目标站点的定位器映射
//!
//! 所有 UI 控件的定位方式集中在这里，与步骤逻辑分离：
//! 目标站点的 DOM 结构变化时只需要改这一个文件。

use std::fmt;

/// 元素定位器
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Locator::XPath(expression.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css({})", s),
            Locator::XPath(s) => write!(f, "xpath({})", s),
        }
    }
}

// ========== 登录页 ==========

pub fn username_input() -> Locator {
    Locator::css(r#"input[name="username"]"#)
}

pub fn password_input() -> Locator {
    Locator::css(r#"input[name="password"]"#)
}

pub fn login_button() -> Locator {
    Locator::css(r#"button[type="submit"]"#)
}

/// 登录成功的标记：顶栏面包屑
pub fn dashboard_marker() -> Locator {
    Locator::css(".oxd-topbar-header-breadcrumb")
}

// ========== Recruitment 模块 ==========

pub fn recruitment_nav_link() -> Locator {
    Locator::xpath(r#"//a[.//span[text()="Recruitment"]]"#)
}

/// 候选人列表页的标记：过滤器标题
pub fn records_header() -> Locator {
    Locator::css(".oxd-table-filter-header-title")
}

pub fn add_button() -> Locator {
    Locator::xpath(r#"//button[normalize-space(text())="Add"]"#)
}

/// 新建候选人表单的标记：表单标题
pub fn add_candidate_header() -> Locator {
    Locator::xpath(r#"//h6[text()="Add Candidate"]"#)
}

// ========== Add Candidate 表单 ==========

pub fn first_name_input() -> Locator {
    Locator::css(r#"input[name="firstName"]"#)
}

pub fn last_name_input() -> Locator {
    Locator::css(r#"input[name="lastName"]"#)
}

pub fn vacancy_dropdown() -> Locator {
    Locator::css(".oxd-select-wrapper")
}

/// 下拉列表中可见文本与职位名完全一致的选项（不做模糊匹配）
pub fn vacancy_option(vacancy: &str) -> Locator {
    Locator::xpath(format!(
        r#"//div[@role="listbox"]//span[text()="{}"]"#,
        vacancy
    ))
}

// 邮箱和电话输入框没有稳定的 name 属性，只能按表单结构定位
pub fn email_input() -> Locator {
    Locator::xpath(r#"//form//div[3]/div/div[1]/div/div[2]/input"#)
}

pub fn contact_input() -> Locator {
    Locator::xpath(r#"//form//div[3]/div/div[2]/div/div[2]/input"#)
}

pub fn resume_file_input() -> Locator {
    Locator::css(r#"input[type="file"]"#)
}

pub fn save_button() -> Locator {
    Locator::css(r#"button[type="submit"]"#)
}

/// 保存成功的标记：进入 Application Stage 视图
pub fn application_stage_marker() -> Locator {
    Locator::xpath(r#"//*[text()="Application Stage"]"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vacancy_option_uses_exact_visible_text() {
        let locator = vacancy_option("QA Engineer");
        assert_eq!(
            locator,
            Locator::xpath(r#"//div[@role="listbox"]//span[text()="QA Engineer"]"#)
        );
    }

    #[test]
    fn test_locator_display() {
        assert_eq!(
            dashboard_marker().to_string(),
            "css(.oxd-topbar-header-breadcrumb)"
        );
    }
}
