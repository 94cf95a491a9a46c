use insta::assert_snapshot;

use narrate::narrative::convert;

#[test]
fn keyed_features() {
    let out = convert("**特徴**：\n- **A**：速い\n- **B**：安い\n");
    assert_snapshot!(out, @r"
**特徴**：

Aは速いという特徴があります。また、Bは安いという特徴もあります。
");
}

#[test]
fn numbered_steps() {
    let out = convert("**手順**：\n1. 準備する\n2. 実行する\n3. 確認する\n");
    assert_snapshot!(out, @r"
**手順**：

まず、準備する。次に、実行する。最後に、確認する。
");
}

#[test]
fn mixed_lesson() {
    let input = "\
# 第1章 はじめに

本章では基本を学びます。

**このツールの特徴**：
- **高速**：大量の文書を一度に処理できる
- **安全**：変更がない文書は書き換えない
- **簡単**：設定なしで動く

**メリット**：
- 作業時間が減る
- 表記が揃う

**使い方**：
1. 文書を用意する
2. コマンドを実行する
3. 結果を確認する

**補足**：
本文はそのまま残ります。
";
    assert_snapshot!(convert(input), @r"
# 第1章 はじめに

本章では基本を学びます。

**このツールの特徴**：

高速は大量の文書を一度に処理できるという特徴があります。また、安全は変更がない文書は書き換えないという特徴があります。また、簡単は設定なしで動くという特徴もあります。

**メリット**：

作業時間が減る。また、表記が揃う。

**使い方**：

まず、文書を用意する。次に、コマンドを実行する。最後に、結果を確認する。

**補足**：
本文はそのまま残ります。
");
}
