//! Prompt and script text. Treated as data: the control flow around these
//! strings never depends on their wording.

use haven_core::config::CrisisConfig;

/// Base persona instruction, used alone on the first turn of a conversation.
pub const SYSTEM_PROMPT: &str = "\
You are a protective, grounded mental health companion with the energy of a caring \
nightclub bouncer: watchful, calm, direct but warm. You communicate over text messages.

YOUR VIBE:
- Bouncer energy: you guard the door of someone's mental space. Protective, never aggressive.
- Straight talk: direct, honest, no-BS. Cut through overthinking with clarity.
- Deeply caring: nothing fazes you, and you actually care.

COMMUNICATION STYLE:
- Short and punchy: 1-3 sentences max, text-message style.
- Real talk: \"Hey, that's rough\" not \"I acknowledge your emotional experience\".
- Protective: \"I got you.\" \"Let's handle this.\" \"You're safe here.\"

YOUR MOVES:
- Read the vibe instantly: crisis? stress? just venting?
- Offer tools (breathing, grounding, reframing) framed casually: \"Try this. Trust me.\"
- Know your limits: you're support, not a therapist. Be clear about that.

CRISIS MODE:
If they're in danger, switch to immediate mode: tell them to call 988 or text HOME to \
741741, or 911 if it's urgent, then be there for them afterwards.";

/// Addendum appended to the persona on continuing conversations.
pub const CONVERSATION_CONTEXT: &str = "\
This is an ongoing conversation. The user may reference previous messages. \
Be consistent with your supportive approach.";

/// Greeting returned by the `start` command and shown to new users.
pub fn greeting(bot_name: &str) -> String {
    format!(
        "Hey. I'm {bot_name}.\n\n\
         Think of me like a bouncer for your mental space - I'm here to keep things safe, \
         real, and grounded.\n\n\
         What's going on?\n\n\
         (Real talk: I'm AI, not a therapist. For serious stuff, hit up a pro. For everything \
         else, I got you.)"
    )
}

/// Static help text for the `help` command.
pub fn help_text(bot_name: &str) -> String {
    format!(
        "Here's what I do:\n\n\
         💬 Real talk about what's on your mind\n\
         🧘 Quick tools (breathing, grounding, reframing)\n\
         🛡️ Keep your mental space safe\n\
         📚 Connect you to real help when needed\n\n\
         Just text me. No commands needed.\n\n\
         Commands if you want em:\n\
         → start - fresh convo\n\
         → reset - clear history\n\
         → crisis - emergency numbers\n\
         → resources - mental health support\n\n\
         I'm {bot_name}. I'm support, not therapy. But I'm here."
    )
}

/// Acknowledgement returned by the `reset` command.
pub fn reset_ack() -> String {
    "Conversation reset. How can I support you today?".to_string()
}

/// Static resource listing for the `resources` command.
pub fn resources_text(crisis: &CrisisConfig) -> String {
    format!(
        "📚 **Mental Health Resources**\n\n\
         **Crisis Support:**\n\
         • {hotline} - Suicide & Crisis Lifeline\n\
         • Text HOME to {text_line} - Crisis Text Line\n\
         • 911 - Emergency services\n\n\
         **Mental Health Support:**\n\
         • SAMHSA Helpline: 1-800-662-4357\n\
         • NAMI Helpline: 1-800-950-6264\n\
         • Psychology Today: psychologytoday.com/us/therapists\n\n\
         **Online Resources:**\n\
         • MentalHealth.gov\n\
         • NIMH.nih.gov\n\n\
         Remember: Professional help is important. These resources can guide you to the \
         right support. 💙",
        hotline = crisis.hotline,
        text_line = crisis.text_line,
    )
}

/// Fallback when the provider signals throttling.
pub fn rate_limit_fallback(crisis: &CrisisConfig) -> String {
    format!(
        "I'm experiencing high volume right now. Please give me a moment and try again. \
         If this is urgent, please reach out to a crisis line: Call/Text {hotline} or text \
         HOME to {text_line}.",
        hotline = crisis.hotline,
        text_line = crisis.text_line,
    )
}

/// Fallback for any other provider failure.
pub fn generic_fallback(crisis: &CrisisConfig) -> String {
    format!(
        "I'm having trouble responding right now. If you're in crisis, please reach out for \
         immediate help: Call/Text {hotline} (Suicide & Crisis Lifeline) or text HOME to \
         {text_line}. I'll be back soon.",
        hotline = crisis.hotline,
        text_line = crisis.text_line,
    )
}
