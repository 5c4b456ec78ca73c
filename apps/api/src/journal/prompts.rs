// Coaching persona templates, one per stage.
// Placeholders: {topic_focus} (empty or a line ending in \n), {message}.

use crate::models::progress::Stage;
use crate::training::topics::TrainingTopic;

pub const AWAKENING_PERSONA: &str = "\
あなたは人間性と創造性を取り戻すためのAIコーチです。\
答えを出さずに、思考を深める質問を返してください。
{topic_focus}ユーザー: {message}
AI:";

pub const REFINEMENT_PERSONA: &str = "\
あなたはユーザーの思考パターンを映し出すAIコーチです。\
発言に表れている考え方の癖や繰り返し現れるテーマに気づけるよう、\
答えを出さずに振り返りを促す質問を返してください。
{topic_focus}ユーザー: {message}
AI:";

pub const CO_CREATION_PERSONA: &str = "\
あなたはユーザーと共に考える創造的なパートナーです。\
ユーザーの考えを尊重しながら新しい視点を一つ添え、\
二人でアイデアを発展させるための問いを返してください。
{topic_focus}ユーザー: {message}
AI:";

pub fn persona_for(stage: Stage) -> &'static str {
    match stage {
        Stage::Awakening => AWAKENING_PERSONA,
        Stage::Refinement => REFINEMENT_PERSONA,
        Stage::CoCreation => CO_CREATION_PERSONA,
    }
}

/// Wraps the user's message in the persona for their stage.
pub fn build_chat_prompt(stage: Stage, topic: Option<&TrainingTopic>, message: &str) -> String {
    let topic_focus = match topic {
        Some(topic) if !topic.focus.is_empty() => {
            format!("テーマ: {}。{}\n", topic.title, topic.focus)
        }
        _ => String::new(),
    };

    persona_for(stage)
        .replace("{topic_focus}", &topic_focus)
        .replace("{message}", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::topics::find_topic;

    #[test]
    fn test_stage_one_prompt_layout() {
        let prompt = build_chat_prompt(Stage::Awakening, None, "最近疲れています");
        assert_eq!(
            prompt,
            "あなたは人間性と創造性を取り戻すためのAIコーチです。\
             答えを出さずに、思考を深める質問を返してください。\n\
             ユーザー: 最近疲れています\nAI:"
        );
    }

    #[test]
    fn test_each_stage_has_its_own_persona() {
        let prompts: Vec<_> = [Stage::Awakening, Stage::Refinement, Stage::CoCreation]
            .into_iter()
            .map(|s| build_chat_prompt(s, None, "x"))
            .collect();
        assert_ne!(prompts[0], prompts[1]);
        assert_ne!(prompts[1], prompts[2]);
        assert!(prompts.iter().all(|p| p.ends_with("ユーザー: x\nAI:")));
    }

    #[test]
    fn test_topic_adds_focus_line() {
        let topic = find_topic("goal-setting");
        let prompt = build_chat_prompt(Stage::Refinement, topic, "走りたい");
        assert!(prompt.contains("テーマ: 目標設定と実行。"));
        assert!(prompt.contains("\nテーマ: "));
    }

    #[test]
    fn test_free_talk_adds_nothing() {
        let with_topic = build_chat_prompt(Stage::Awakening, find_topic("free-talk"), "hi");
        assert_eq!(with_topic, build_chat_prompt(Stage::Awakening, None, "hi"));
    }

    #[test]
    fn test_message_placeholders_are_not_expanded() {
        let prompt = build_chat_prompt(Stage::Awakening, None, "{topic_focus}");
        assert!(prompt.contains("ユーザー: {topic_focus}"));
    }
}
