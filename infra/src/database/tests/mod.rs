mod mysql_repository_tests;
