//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! Prefixed text naming a registered command is dispatched to it; any other prefixed text
//! is a lookup key against the link store, answered only when the key exists. Text without
//! the prefix, and the bot's own messages, are dropped without a trace.

use anyhow::Result;

use crate::application::parsing::{fold_trailing, split_command, tokenize};
use crate::application::registry::{CommandContext, CommandRegistry, CommandSpec, SharedStore};
use crate::domain::errors::CommandError;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{InboundMessage, Reply};
use crate::strings::{logs, messages};

pub struct CommandRouter {
    prefix: String,
    own_user_id: Option<String>,
    registry: CommandRegistry,
    store: SharedStore,
}

impl CommandRouter {
    pub fn new(
        prefix: impl Into<String>,
        own_user_id: Option<String>,
        registry: CommandRegistry,
        store: SharedStore,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            own_user_id,
            registry,
            store,
        }
    }

    /// Computes and sends the replies for `message`. Every reply is attempted even if an
    /// earlier one fails to send.
    pub async fn route<C>(&self, chat: &C, message: &InboundMessage) -> Result<()>
    where
        C: ChatProvider + ?Sized,
    {
        let replies = self.replies(message).await;

        let mut failed = 0;
        for reply in &replies {
            let sent = match reply {
                Reply::Plain(text) => chat.send_plain(text).await,
                Reply::Markdown(text) => chat.send_message(text).await,
            };
            if let Err(e) = sent {
                tracing::error!("{}", logs::send_failed(&chat.room_id(), &e));
                failed += 1;
            }
        }

        if failed > 0 {
            anyhow::bail!("{} of {} replies could not be delivered", failed, replies.len());
        }
        Ok(())
    }

    /// The replies `message` should produce, in order. Empty means stay silent.
    pub async fn replies(&self, message: &InboundMessage) -> Vec<Reply> {
        if self.own_user_id.as_deref() == Some(message.sender.as_str()) {
            return Vec::new();
        }

        // Only a trailing line break is dropped; the prefix must open the message and the
        // lookup key is everything after it.
        let body = message.body.trim_end_matches(['\r', '\n']);
        let Some(rest) = body.strip_prefix(self.prefix.as_str()) else {
            return Vec::new();
        };

        let (cmd, args) = split_command(rest);
        match self.registry.find(cmd) {
            Some(spec) => {
                tracing::info!("{}", logs::dispatching(cmd, args, &message.sender));
                self.dispatch(spec, args, &message.sender).await
            }
            None => self.lookup(rest, &message.sender).await,
        }
    }

    async fn dispatch(&self, spec: &CommandSpec, args: &str, sender: &str) -> Vec<Reply> {
        let tokens = match tokenize(args) {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::debug!("Rejecting '{}' arguments: {}", spec.name, e);
                return vec![self.usage(spec.usage)];
            }
        };

        // Unquoted values with spaces are only inferred for two-argument commands.
        let args = if spec.max_args() >= 2 {
            fold_trailing(tokens, spec.max_args())
        } else {
            tokens
        };

        if !spec.arity.contains(&args.len()) {
            return vec![self.usage(spec.usage)];
        }

        let ctx = CommandContext {
            store: &self.store,
            registry: &self.registry,
            prefix: &self.prefix,
            sender,
        };

        match spec.handler.run(&ctx, &args).await {
            Ok(replies) => replies,
            Err(CommandError::Usage(usage)) => vec![self.usage(usage)],
            Err(CommandError::Storage(_)) => vec![Reply::plain(messages::STORE_FAILED)],
        }
    }

    fn usage(&self, syntax: &str) -> Reply {
        Reply::markdown(messages::usage(&self.prefix, syntax))
    }

    async fn lookup(&self, name: &str, sender: &str) -> Vec<Reply> {
        let store = self.store.read().await;
        match store.get(name) {
            Some(link) => {
                tracing::info!("{}", logs::lookup_hit(name, sender));
                vec![Reply::plain(messages::link_line(name, link))]
            }
            None => {
                tracing::debug!("{}", logs::lookup_miss(name));
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::store::LinkStore;
    use async_trait::async_trait;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tokio::sync::RwLock;

    const BOT: &str = "@linkbot:example.org";
    const USER: &str = "@alice:example.org";

    /// Records every message, with its format, instead of sending it anywhere.
    #[derive(Default)]
    struct RecordingChat {
        sent: Mutex<Vec<Reply>>,
        fail_on: Option<String>,
    }

    impl RecordingChat {
        fn sent(&self) -> Vec<Reply> {
            self.sent.lock().unwrap().clone()
        }

        fn record(&self, reply: Reply) -> Result<String, String> {
            if self.fail_on.as_deref() == Some(reply.text()) {
                return Err("transport down".to_string());
            }
            let mut sent = self.sent.lock().unwrap();
            sent.push(reply);
            Ok(format!("$event{}", sent.len()))
        }
    }

    #[async_trait]
    impl ChatProvider for RecordingChat {
        async fn send_message(&self, content: &str) -> Result<String, String> {
            self.record(Reply::markdown(content))
        }

        async fn send_plain(&self, content: &str) -> Result<String, String> {
            self.record(Reply::plain(content))
        }

        fn room_id(&self) -> String {
            "!room:example.org".to_string()
        }
    }

    fn router_in(dir: &TempDir) -> CommandRouter {
        let store = LinkStore::load(dir.path().join("config.json")).unwrap();
        CommandRouter::new(
            "!!",
            Some(BOT.to_string()),
            CommandRegistry::standard(),
            Arc::new(RwLock::new(store)),
        )
    }

    async fn say(router: &CommandRouter, body: &str) -> Vec<Reply> {
        router.replies(&InboundMessage::new(USER, body)).await
    }

    #[tokio::test]
    async fn test_set_list_lookup_scenario() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);

        let confirm = say(&router, "!!set alpha http://a.example").await;
        assert_eq!(confirm.len(), 1);
        assert!(confirm[0].text().contains("alpha"));
        assert!(confirm[0].text().contains("http://a.example"));

        assert_eq!(say(&router, "!!servers").await, vec!["1. alpha"]);
        assert_eq!(say(&router, "!!alpha").await, vec!["alpha: http://a.example"]);
    }

    #[tokio::test]
    async fn test_set_with_missing_argument_is_usage_error() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);

        let reply = say(&router, "!!set onlyoneArg").await;
        assert_eq!(reply, vec!["Usage: `!!set <name> <link>`"]);
        assert_eq!(say(&router, "!!set").await, reply);
        assert_eq!(say(&router, r#"!!set "" http://x"#).await, reply);

        assert_eq!(say(&router, "!!servers").await, vec![messages::NO_SERVERS]);
        assert!(!dir.path().join("config.json").exists());
    }

    #[tokio::test]
    async fn test_set_joins_extra_words_into_link() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);

        say(&router, "!!set lobby join us at http://l.example").await;
        say(&router, r#"!!set "my server" 'http://m.example'"#).await;

        assert_eq!(
            say(&router, "!!lobby").await,
            vec!["lobby: join us at http://l.example"]
        );
        assert_eq!(
            say(&router, "!!my server").await,
            vec!["my server: http://m.example"]
        );
    }

    #[tokio::test]
    async fn test_unterminated_quote_is_usage_error() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);

        let reply = say(&router, r#"!!set "broken http://x"#).await;
        assert_eq!(reply, vec!["Usage: `!!set <name> <link>`"]);
    }

    #[tokio::test]
    async fn test_set_alias() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);

        let reply = say(&router, "!!set_link beta http://b.example").await;
        assert_eq!(reply, vec!["Successfully set beta link to: http://b.example"]);
    }

    #[tokio::test]
    async fn test_overwrite_keeps_order_and_size() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);

        say(&router, "!!set b http://1").await;
        say(&router, "!!set a http://2").await;
        say(&router, "!!set b http://3").await;
        say(&router, "!!set b http://3").await;

        assert_eq!(say(&router, "!!servers").await, vec!["1. b\n2. a"]);
        assert_eq!(say(&router, "!!b").await, vec!["b: http://3"]);
    }

    #[tokio::test]
    async fn test_show_all_one_reply_per_entry() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);

        assert_eq!(say(&router, "!!server_L").await, vec![messages::NO_SERVERS]);

        say(&router, "!!set alpha http://a.example").await;
        say(&router, "!!set beta http://b.example").await;

        let expected = vec!["alpha: http://a.example", "beta: http://b.example"];
        assert_eq!(say(&router, "!!server_L").await, expected);
        assert_eq!(say(&router, "!!show-all").await, expected);
    }

    #[tokio::test]
    async fn test_zero_arg_commands_reject_arguments() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);

        assert_eq!(say(&router, "!!servers now").await, vec!["Usage: `!!servers`"]);
        assert_eq!(say(&router, "!!server_L x").await, vec!["Usage: `!!server_L`"]);
    }

    #[tokio::test]
    async fn test_help() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);

        let summary = say(&router, "!!help").await;
        assert_eq!(summary.len(), 1);
        for name in ["set", "servers", "server_L", "help"] {
            assert!(summary[0].text().contains(name), "help should mention {name}");
        }

        let detail = say(&router, "!!help set").await;
        assert!(detail[0].text().contains(crate::strings::help::SET_DESCRIPTION));

        let alias = say(&router, "!!help show-all").await;
        assert!(alias[0].text().contains("server_L"));

        assert_eq!(say(&router, "!!help nope").await, vec![messages::COMMAND_NOT_FOUND]);
        assert_eq!(
            say(&router, "!!help set servers").await,
            vec!["Usage: `!!help [command]`"]
        );
    }

    #[tokio::test]
    async fn test_unknown_key_is_silent() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);

        assert!(say(&router, "!!nothing-here").await.is_empty());
        assert!(say(&router, "!!").await.is_empty());
        assert!(say(&router, "!!SET a b").await.is_empty());
    }

    #[tokio::test]
    async fn test_unprefixed_and_own_messages_are_ignored() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);
        say(&router, "!!set alpha http://a.example").await;

        assert!(say(&router, "alpha").await.is_empty());
        assert!(say(&router, "hello !!alpha").await.is_empty());
        assert!(say(&router, "!alpha").await.is_empty());
        assert!(say(&router, "   !!alpha").await.is_empty());
        assert!(say(&router, "\t!!servers").await.is_empty());

        let own = router
            .replies(&InboundMessage::new(BOT, "!!alpha"))
            .await;
        assert!(own.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_uses_exact_remainder() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);
        say(&router, r#"!!set "two  spaces" http://t.example"#).await;

        assert_eq!(
            say(&router, "!!two  spaces").await,
            vec!["two  spaces: http://t.example"]
        );
        assert!(say(&router, "!!two spaces").await.is_empty());
    }

    #[tokio::test]
    async fn test_trailing_line_break_is_ignored() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);
        say(&router, "!!set alpha http://a.example").await;

        assert_eq!(say(&router, "!!alpha\r\n").await, vec!["alpha: http://a.example"]);
        assert_eq!(say(&router, "!!servers\n").await, vec!["1. alpha"]);
    }

    #[tokio::test]
    async fn test_set_refuses_names_that_cannot_be_looked_up() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);

        for body in [
            r#"!!set "k " v"#,
            r#"!!set " k" v"#,
            r#"!!set "help me" v"#,
            r#"!!set servers v"#,
        ] {
            let reply = say(&router, body).await;
            assert_eq!(reply.len(), 1);
            assert!(
                reply[0].text().starts_with("Cannot save"),
                "{body} should be refused"
            );
        }

        assert_eq!(say(&router, "!!servers").await, vec![messages::NO_SERVERS]);
        assert!(!dir.path().join("config.json").exists());
    }

    #[tokio::test]
    async fn test_user_data_is_sent_plain() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);
        say(&router, "!!set my_server http://x.example/*a*").await;

        let chat = RecordingChat::default();
        for body in ["!!my_server", "!!server_L", "!!servers", "!!help"] {
            router
                .route(&chat, &InboundMessage::new(USER, body))
                .await
                .unwrap();
        }

        let sent = chat.sent();
        assert_eq!(
            sent[0],
            Reply::plain("my_server: http://x.example/*a*")
        );
        assert_eq!(
            sent[1],
            Reply::plain("my_server: http://x.example/*a*")
        );
        assert_eq!(sent[2], Reply::plain("1. my_server"));
        assert!(matches!(sent[3], Reply::Markdown(_)));
    }

    #[tokio::test]
    async fn test_write_failure_reply() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);
        fs::create_dir(dir.path().join("config.json")).unwrap();

        let reply = say(&router, "!!set alpha http://a.example").await;
        assert_eq!(reply, vec![messages::STORE_FAILED]);

        // Memory is not rolled back.
        assert_eq!(say(&router, "!!alpha").await, vec!["alpha: http://a.example"]);
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let dir = TempDir::new().unwrap();
        {
            let router = router_in(&dir);
            say(&router, "!!set alpha http://a.example").await;
        }

        let router = router_in(&dir);
        assert_eq!(say(&router, "!!alpha").await, vec!["alpha: http://a.example"]);
    }

    #[tokio::test]
    async fn test_custom_prefix() {
        let dir = TempDir::new().unwrap();
        let store = LinkStore::load(dir.path().join("config.json")).unwrap();
        let router = CommandRouter::new(
            "??",
            None,
            CommandRegistry::standard(),
            Arc::new(RwLock::new(store)),
        );

        assert!(say(&router, "!!servers").await.is_empty());
        assert_eq!(say(&router, "??servers").await, vec![messages::NO_SERVERS]);
    }

    #[tokio::test]
    async fn test_route_sends_every_reply() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);
        say(&router, "!!set alpha http://a.example").await;
        say(&router, "!!set beta http://b.example").await;

        let chat = RecordingChat::default();
        router
            .route(&chat, &InboundMessage::new(USER, "!!server_L"))
            .await
            .unwrap();
        assert_eq!(
            chat.sent(),
            vec!["alpha: http://a.example", "beta: http://b.example"]
        );

        let quiet = RecordingChat::default();
        router
            .route(&quiet, &InboundMessage::new(USER, "just chatting"))
            .await
            .unwrap();
        assert!(quiet.sent().is_empty());
    }

    #[tokio::test]
    async fn test_route_continues_after_send_failure() {
        let dir = TempDir::new().unwrap();
        let router = router_in(&dir);
        say(&router, "!!set alpha http://a.example").await;
        say(&router, "!!set beta http://b.example").await;

        let chat = RecordingChat {
            fail_on: Some("alpha: http://a.example".to_string()),
            ..Default::default()
        };
        let result = router
            .route(&chat, &InboundMessage::new(USER, "!!server_L"))
            .await;

        assert!(result.is_err());
        assert_eq!(chat.sent(), vec!["beta: http://b.example"]);
    }

    #[tokio::test]
    async fn test_concurrent_sets_all_land() {
        let dir = TempDir::new().unwrap();
        let router = Arc::new(router_in(&dir));

        let mut handles = Vec::new();
        for i in 0..8 {
            let router = router.clone();
            handles.push(tokio::spawn(async move {
                router
                    .replies(&InboundMessage::new(USER, format!("!!set s{i} http://{i}")))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let reloaded = LinkStore::load(dir.path().join("config.json")).unwrap();
        assert_eq!(reloaded.len(), 8);
    }
}
