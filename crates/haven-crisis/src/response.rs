//! Fixed, severity-scaled safety scripts. Table-driven, no randomness.

use haven_core::config::CrisisConfig;

use crate::detect::Severity;

fn resources_block(crisis: &CrisisConfig) -> String {
    format!(
        "\n🆘 **CRISIS RESOURCES**\n\n\
         If you're in immediate danger:\n\
         • Call 911\n\n\
         24/7 Crisis Support:\n\
         • Call/Text {hotline} (Suicide & Crisis Lifeline)\n\
         • Text HOME to {text_line} (Crisis Text Line)\n\
         • Call 1-800-273-8255 (National Suicide Prevention Lifeline)\n\n\
         International:\n\
         • Visit findahelpline.com for your country\n\n\
         You can also:\n\
         • Go to your nearest emergency room\n\
         • Call a trusted friend or family member\n\
         • Contact your therapist if you have one",
        hotline = crisis.hotline,
        text_line = crisis.text_line,
    )
}

/// The safety script for a given severity tier.
pub fn crisis_response(severity: Severity, crisis: &CrisisConfig) -> String {
    let resources = resources_block(crisis);
    match severity {
        Severity::High => format!(
            "I'm really concerned about your safety right now. What you're feeling is serious, \
             and you deserve immediate support from trained crisis professionals.\n\
             {resources}\n\n\
             Please reach out to one of these resources right away. You don't have to go \
             through this alone. 💙"
        ),
        Severity::Medium => format!(
            "I'm hearing that you're in a really difficult place. I want you to know that help \
             is available, and things can get better.\n\
             {resources}\n\n\
             Please consider reaching out to one of these resources. They're staffed by trained \
             professionals who can provide the support you need right now. 💙"
        ),
        Severity::Low => format!(
            "I hear that you're struggling, and I want to make sure you have access to support \
             if you need it.\n\
             {resources}\n\n\
             These resources are available 24/7 if you need someone to talk to. You deserve \
             support. 💙"
        ),
    }
}
