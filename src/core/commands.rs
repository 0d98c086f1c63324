use crate::domain::model::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    OtherCommand(String),
    VideoLink(String),
    Ignored,
}

pub fn classify(message: &Message) -> Intent {
    let Some(text) = message.text.as_deref() else {
        return Intent::Ignored;
    };

    if !is_command(message, text) {
        return Intent::VideoLink(text.trim().to_string());
    }

    // "/start@my_bot args" -> "start"
    let name = text
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    if name == "start" {
        Intent::Start
    } else {
        Intent::OtherCommand(name)
    }
}

fn is_command(message: &Message, text: &str) -> bool {
    match message.entities.first() {
        Some(entity) => entity.kind == "bot_command" && entity.offset == 0,
        None => text.starts_with('/'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Chat, MessageEntity};

    fn message(text: Option<&str>, entities: Vec<MessageEntity>) -> Message {
        Message {
            message_id: 1,
            date: 0,
            chat: Chat {
                id: 7,
                kind: "private".to_string(),
                username: None,
            },
            from: None,
            text: text.map(str::to_string),
            entities,
        }
    }

    fn command_entity(length: usize) -> MessageEntity {
        MessageEntity {
            kind: "bot_command".to_string(),
            offset: 0,
            length,
        }
    }

    #[test]
    fn test_start_command() {
        assert_eq!(
            classify(&message(Some("/start"), vec![command_entity(6)])),
            Intent::Start
        );
        assert_eq!(
            classify(&message(Some("/start@tutor_bot hi"), vec![command_entity(15)])),
            Intent::Start
        );
        assert_eq!(classify(&message(Some("/start"), vec![])), Intent::Start);
    }

    #[test]
    fn test_other_commands_are_not_links() {
        assert_eq!(
            classify(&message(Some("/help"), vec![command_entity(5)])),
            Intent::OtherCommand("help".to_string())
        );
    }

    #[test]
    fn test_text_is_video_link() {
        assert_eq!(
            classify(&message(Some("  https://youtu.be/abc \n"), vec![])),
            Intent::VideoLink("https://youtu.be/abc".to_string())
        );
    }

    #[test]
    fn test_url_entity_is_not_a_command() {
        let entity = MessageEntity {
            kind: "url".to_string(),
            offset: 0,
            length: 20,
        };
        assert_eq!(
            classify(&message(Some("https://youtu.be/abc"), vec![entity])),
            Intent::VideoLink("https://youtu.be/abc".to_string())
        );
    }

    #[test]
    fn test_messages_without_text_are_ignored() {
        assert_eq!(classify(&message(None, vec![])), Intent::Ignored);
    }

    #[test]
    fn test_blank_text_still_goes_down_the_link_path() {
        // 空白訊息會得到 invalid URL 的回覆
        assert_eq!(
            classify(&message(Some("   "), vec![])),
            Intent::VideoLink(String::new())
        );
    }
}
