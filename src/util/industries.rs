//! Industry catalog for the upload-time industry selector.

#[cfg(test)]
#[path = "industries_test.rs"]
mod industries_test;

use crate::net::types::Industry;

/// All selectable industries in display order.
pub const ALL_INDUSTRIES: [Industry; 9] = [
    Industry::Ecommerce,
    Industry::Finance,
    Industry::Healthcare,
    Industry::Education,
    Industry::Manufacturing,
    Industry::Internet,
    Industry::Hr,
    Industry::Marketing,
    Industry::Other,
];

/// Display label, icon, and example-scenario blurb for an industry.
pub fn industry_option(industry: Industry) -> (&'static str, &'static str, &'static str) {
    match industry {
        Industry::Ecommerce => ("电商零售", "🛒", "销售额分析、转化率、客单价"),
        Industry::Finance => ("金融保险", "💰", "风控模型、理赔分析、投资收益"),
        Industry::Healthcare => ("医疗健康", "🏥", "临床试验、疗效对比、患者分析"),
        Industry::Education => ("教育培训", "📚", "成绩分析、课程效果、学员留存"),
        Industry::Manufacturing => ("制造业", "🏭", "质量检测、产能分析、良品率"),
        Industry::Internet => ("互联网", "🌐", "用户增长、留存率、A/B测试"),
        Industry::Hr => ("人力资源", "👥", "绩效评估、薪酬分析、招聘效果"),
        Industry::Marketing => ("市场营销", "📢", "广告效果、渠道ROI、品牌认知"),
        Industry::Other => ("其他", "📊", "自定义场景"),
    }
}

/// Display label for an industry.
pub fn industry_label(industry: Industry) -> &'static str {
    industry_option(industry).0
}

/// Icon for an industry.
pub fn industry_icon(industry: Industry) -> &'static str {
    industry_option(industry).1
}

/// Wire string for an industry, used when building query strings.
pub fn industry_value(industry: Industry) -> &'static str {
    match industry {
        Industry::Ecommerce => "ecommerce",
        Industry::Finance => "finance",
        Industry::Healthcare => "healthcare",
        Industry::Education => "education",
        Industry::Manufacturing => "manufacturing",
        Industry::Internet => "internet",
        Industry::Hr => "hr",
        Industry::Marketing => "marketing",
        Industry::Other => "other",
    }
}

/// Parse a wire string back into an industry.
pub fn industry_from_value(value: &str) -> Option<Industry> {
    ALL_INDUSTRIES.into_iter().find(|i| industry_value(*i) == value)
}
