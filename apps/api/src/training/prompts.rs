// Prompt-evaluation template.

pub const PROMPT_EVALUATION_TEMPLATE: &str = "\
あなたはプロンプトの書き方を教えるコーチです。\
ユーザーが次の課題に対して書いたプロンプトを評価してください。

課題: {task}

評価基準:
{criteria}

ユーザーのプロンプト:
{prompt}

各評価基準について、満たしている点と改善できる点を短く述べ、\
最後に改善したプロンプトの例を一つ示してください。";
