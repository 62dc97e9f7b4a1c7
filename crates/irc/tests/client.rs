#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests running the IRC client against a scripted fake server.

use std::time::Duration;

use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines},
    net::{
        TcpListener,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
};

use {
    sedbot_channels::ChannelRegistry,
    sedbot_config::IrcConfig,
    sedbot_irc::{Error, IrcClient, MAX_PRIVATE_CONVERSATIONS},
};

struct FakeServer {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl FakeServer {
    async fn expect(&mut self, expected: &str) {
        let line = tokio::time::timeout(Duration::from_secs(5), self.lines.next_line())
            .await
            .expect("timed out waiting for client line")
            .unwrap()
            .expect("client closed the connection");
        assert_eq!(line, expected);
    }

    async fn send(&mut self, line: &str) {
        self.send_bytes(line.as_bytes()).await;
    }

    async fn send_bytes(&mut self, line: &[u8]) {
        self.writer.write_all(line).await.unwrap();
        self.writer.write_all(b"\r\n").await.unwrap();
    }

    async fn register(&mut self) {
        self.expect("USER sedbot 8 * :sedbot").await;
        self.expect("NICK sedbot").await;
        self.expect("JOIN #test").await;
    }
}

async fn start() -> (TcpListener, IrcConfig) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let config = IrcConfig {
        server: "127.0.0.1".into(),
        port,
        channels: vec!["#test".into()],
        ..IrcConfig::default()
    };
    (listener, config)
}

async fn accept(listener: &TcpListener) -> FakeServer {
    let (stream, _) = listener.accept().await.unwrap();
    let (read_half, writer) = stream.into_split();
    FakeServer {
        lines: BufReader::new(read_half).lines(),
        writer,
    }
}

#[tokio::test]
async fn registers_answers_pings_and_rewrites_messages() {
    let (listener, config) = start().await;

    let server = tokio::spawn(async move {
        let mut server = accept(&listener).await;
        server.register().await;

        server.send(":irc.test 001 sedbot :Welcome").await;
        server.send("PING :irc.test").await;
        server.expect("PONG :irc.test").await;

        server.send(":alice!a@host PRIVMSG #test :foo baz").await;
        server.send(":bob!b@host PRIVMSG #test :s/foo/bar/").await;
        server.expect("PRIVMSG #test :<alice> bar baz").await;

        server.send(":bob!b@host PRIVMSG #test :y/ab/xy/").await;
        server.expect("PRIVMSG #test :<alice> yxr yxz").await;

        server.send(":carol!c@host PRIVMSG #test :s/nothing/here/").await;
        server.expect("PRIVMSG #test :<carol> No match found.").await;

        // Private messages are answered to the sender.
        server.send(":dave!d@host PRIVMSG sedbot :typo").await;
        server.send(":dave!d@host PRIVMSG sedbot :s/typo/fixed/").await;
        server.expect("PRIVMSG dave :<dave> fixed").await;
    });

    let client = IrcClient::connect(&config).await.unwrap();
    let mut registry = ChannelRegistry::new(client.outbound());
    let result = client.run(&mut registry).await;

    server.await.unwrap();
    assert!(matches!(result, Err(Error::Disconnected)));
    let mut channels = registry.channels();
    channels.sort_unstable();
    assert_eq!(channels, vec!["#test", "dave"]);
}

#[tokio::test]
async fn retries_nick_when_taken() {
    let (listener, config) = start().await;

    let server = tokio::spawn(async move {
        let mut server = accept(&listener).await;
        server.register().await;
        server
            .send(":irc.test 433 * sedbot :Nickname is already in use")
            .await;
        server.expect("NICK sedbot_").await;
    });

    let client = IrcClient::connect(&config).await.unwrap();
    let mut registry = ChannelRegistry::new(client.outbound());
    let result = client.run(&mut registry).await;

    server.await.unwrap();
    assert!(matches!(result, Err(Error::Disconnected)));
    assert!(registry.is_empty());
}

#[tokio::test]
async fn survives_lines_that_are_not_utf8() {
    let (listener, config) = start().await;

    let server = tokio::spawn(async move {
        let mut server = accept(&listener).await;
        server.register().await;

        server.send_bytes(b":eve!e@host PRIVMSG #test :caf\xe9").await;
        server.send(":alice!a@host PRIVMSG #test :foo").await;
        server.send(":bob!b@host PRIVMSG #test :s/foo/bar/").await;
        server.expect("PRIVMSG #test :<alice> bar").await;

        // The undecodable byte was kept as U+FFFD.
        server.send(":bob!b@host PRIVMSG #test :s/caf./cafe/").await;
        server.expect("PRIVMSG #test :<eve> cafe").await;
    });

    let client = IrcClient::connect(&config).await.unwrap();
    let mut registry = ChannelRegistry::new(client.outbound());
    let result = client.run(&mut registry).await;

    server.await.unwrap();
    assert!(matches!(result, Err(Error::Disconnected)));
}

#[tokio::test]
async fn private_conversations_are_capped() {
    let (listener, config) = start().await;
    let senders = MAX_PRIVATE_CONVERSATIONS + 8;

    let server = tokio::spawn(async move {
        let mut server = accept(&listener).await;
        server.register().await;
        for i in 0..senders {
            server
                .send(&format!(":user{i}!u@host PRIVMSG sedbot :hello"))
                .await;
        }
        server.send(":alice!a@host PRIVMSG #test :hi").await;
    });

    let client = IrcClient::connect(&config).await.unwrap();
    let mut registry = ChannelRegistry::new(client.outbound());
    let result = client.run(&mut registry).await;

    server.await.unwrap();
    assert!(matches!(result, Err(Error::Disconnected)));
    assert_eq!(registry.len(), MAX_PRIVATE_CONVERSATIONS + 1);
    let channels = registry.channels();
    assert!(channels.contains(&"#test"));
    assert!(channels.contains(&format!("user{}", senders - 1).as_str()));
    assert!(!channels.contains(&"user0"));
}

#[tokio::test]
async fn connect_failure_is_reported() {
    let (listener, config) = start().await;
    drop(listener);
    let err = IrcClient::connect(&config).await.err().unwrap();
    assert!(err.to_string().starts_with("failed to connect to 127.0.0.1:"));
}
