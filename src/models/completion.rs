use serde::Deserialize;

/// The subset of a chat-completion reply this tool reads. Other fields
/// (`id`, `model`, `usage`, ...) are ignored.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: String,
}

impl ChatResponse {
    pub fn into_first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
    }
}
