// Reflection prompt templates.

pub const REFLECTION_TEMPLATE: &str = "\
あなたは内省を支えるAIコーチです。\
以下の対話を読み、ユーザーが自分の考えを振り返るための問いを一つだけ作ってください。\
問いは一文で、答えやアドバイスを含めないでください。

対話:
{history}

問い:";

/// Used when the LLM cannot produce a reflection question.
pub const FALLBACK_REFLECTION: &str =
    "今日の対話を振り返って、最も心に残った気づきは何ですか？";
