use serde::Serialize;

/// A theme the user can pick before chatting. The focus line is added to the
/// coaching prompt so the questions stay on the theme.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingTopic {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub focus: &'static str,
}

pub const TRAINING_TOPICS: &[TrainingTopic] = &[
    TrainingTopic {
        id: "self-understanding",
        title: "自己理解を深める",
        description: "自分自身の価値観、感情、思考パターンを理解する",
        focus: "ユーザーが自分の価値観や思考パターンに気づけるよう問いかけてください。",
    },
    TrainingTopic {
        id: "creativity",
        title: "創造性を育む",
        description: "新しいアイデアや視点を見つける力を高める",
        focus: "前提を疑い、新しい視点やアイデアを探す問いかけをしてください。",
    },
    TrainingTopic {
        id: "problem-solving",
        title: "問題解決力を高める",
        description: "問題を多角的に捉え、解決策を見つける",
        focus: "問題を分解し、複数の角度から捉え直せるよう問いかけてください。",
    },
    TrainingTopic {
        id: "goal-setting",
        title: "目標設定と実行",
        description: "具体的な目標を立て、行動につなげる",
        focus: "目標を具体的にし、最初の一歩を考えられるよう問いかけてください。",
    },
    TrainingTopic {
        id: "emotion-management",
        title: "感情の理解と管理",
        description: "感情を理解し、前向きに向き合う",
        focus: "感情に名前をつけ、その背景にあるものを探れるよう問いかけてください。",
    },
    TrainingTopic {
        id: "free-talk",
        title: "自由な対話",
        description: "自由なテーマで気軽に話す",
        focus: "",
    },
];

pub fn find_topic(id: &str) -> Option<&'static TrainingTopic> {
    TRAINING_TOPICS.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_topic() {
        assert_eq!(find_topic("creativity").map(|t| t.title), Some("創造性を育む"));
        assert!(find_topic("astrology").is_none());
    }

    #[test]
    fn test_topic_ids_are_unique() {
        let mut ids: Vec<_> = TRAINING_TOPICS.iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), TRAINING_TOPICS.len());
    }
}
