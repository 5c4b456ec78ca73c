use serde::Serialize;

/// A prompt-writing exercise: the user writes a prompt that accomplishes `task`,
/// and the evaluator judges it against `criteria`.
#[derive(Debug, Clone, Serialize)]
pub struct PromptExercise {
    pub id: &'static str,
    pub title: &'static str,
    pub task: &'static str,
    pub criteria: &'static [&'static str],
}

pub const EXERCISE_BANK: &[PromptExercise] = &[
    PromptExercise {
        id: "clarify-goal",
        title: "目的を明確にする",
        task: "週末の過ごし方について、AIに自分に合った提案をしてもらうプロンプトを書いてください。",
        criteria: &[
            "何を得たいのか目的が明確である",
            "自分の状況や好みが伝わる情報を含んでいる",
            "回答の形式や量を指定している",
        ],
    },
    PromptExercise {
        id: "give-context",
        title: "背景を伝える",
        task: "職場の人間関係の悩みについて、AIに相談するプロンプトを書いてください。",
        criteria: &[
            "状況の背景が具体的に書かれている",
            "自分が何に困っているのかが明確である",
            "AIに期待する役割を伝えている",
        ],
    },
    PromptExercise {
        id: "think-together",
        title: "一緒に考える",
        task: "新しい趣味を始めたいとき、答えをもらうのではなくAIと一緒に考えるためのプロンプトを書いてください。",
        criteria: &[
            "AIに答えではなく問いや視点を求めている",
            "自分の考えを先に示している",
            "対話を続ける余地を残している",
        ],
    },
    PromptExercise {
        id: "set-constraints",
        title: "条件を設定する",
        task: "一週間の夕食の献立をAIに考えてもらうプロンプトを書いてください。",
        criteria: &[
            "予算や時間などの制約を示している",
            "避けたいことや優先したいことを伝えている",
            "出力の形式を指定している",
        ],
    },
];

pub fn find_exercise(id: &str) -> Option<&'static PromptExercise> {
    EXERCISE_BANK.iter().find(|e| e.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_exercise_has_criteria() {
        assert!(EXERCISE_BANK.iter().all(|e| !e.criteria.is_empty()));
    }

    #[test]
    fn test_find_exercise() {
        assert_eq!(find_exercise("give-context").map(|e| e.title), Some("背景を伝える"));
        assert!(find_exercise("missing").is_none());
    }
}
